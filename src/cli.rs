use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roach",
    about = "Route Origin Authorization CHecker: reconcile BGP, IRR and RPKI origins",
    long_about = "Route Origin Authorization CHecker.\n\n\
        Without a subcommand, starts an interactive session: enter ASNs (AS1), \
        IP addresses (1.1.1.1) or CIDRs (1.1.1.0/24), and q to quit.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file [default: ./.roach/config.toml, fallback ~/.config/roach/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only warnings and errors; no progress bar
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up every CIDR in <INPUT> (one per line) and write subnet,origin,rpki CSV to <OUTPUT>
    ///
    /// Only IPv4/IPv6 subnets in CIDR notation are accepted; ASNs and bare
    /// addresses reject the whole file before any request is made.
    Batch {
        /// Input file with IP prefixes/CIDRs, one per line
        input: PathBuf,

        /// Output CSV file with subnet,origin,rpki columns
        output: PathBuf,

        /// Pause between requests in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Look up a single ASN, address or CIDR and print the result
    Query {
        /// ASN (AS13335), address (1.1.1.1) or CIDR (1.1.1.0/24)
        identifier: String,

        /// Output format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
