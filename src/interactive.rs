//! Line-based interactive query session.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::lookup::lookup;
use crate::registry::DataSource;
use crate::report::terminal::{render_error, render_results, IrrPalette};

const BANNER: [&str; 10] = [
    "██████╗  ██████╗  █████╗  ██████╗██   ██╗",
    "██╔══██╗██╔═══██╗██╔══██╗██╔════╝██   ██║",
    "██████╔╝██║   ██║███████║██║     ███████║",
    "██╔══██╗██║   ██║██╔══██║██║     ██╔══██║",
    "██║  ██║╚██████╔╝██║  ██║╚██████╗██║  ██║",
    "╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝",
    "",
    "╔═══════════════════════════════════════╗",
    "║ 🪳 Route Origin Authorization Checker ║",
    "╚═══════════════════════════════════════╝",
];

const SLOW_HINT: &str = "⏳ This is taking abnormally long...";

/// Await `task`, calling `on_slow` once if it is still pending after `hint_after`.
/// The hint never cancels or shortens the task.
pub async fn with_slow_hint<F, T>(task: F, hint_after: Duration, mut on_slow: impl FnMut()) -> T
where
    F: Future<Output = T>,
{
    tokio::pin!(task);
    tokio::select! {
        out = &mut task => return out,
        _ = tokio::time::sleep(hint_after) => on_slow(),
    }
    task.await
}

fn is_exit_command(line: &str) -> bool {
    matches!(line, "q" | "quit" | "exit")
}

fn print_banner() {
    for line in BANNER {
        println!("{}", line.cyan());
    }
    println!();
    println!(
        " Enter ASNs (AS1), IP addresses (1.1.1.1), or CIDRs (1.1.1.0/24); {} to quit.",
        "q".bold()
    );
}

fn prompt() -> Result<()> {
    print!("\n{} ", "roach>".green().bold());
    std::io::stdout().flush().context("Failed to flush stdout")
}

/// Read queries from stdin until EOF or an exit command.
///
/// One lookup runs at a time; the prompt returns only after it finishes.
pub async fn run<S: DataSource>(source: &S, slow_hint: Duration) -> Result<()> {
    let mut palette = IrrPalette::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_banner();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            println!();
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit_command(query) {
            break;
        }

        println!(" {} Fetching route data...", "⠋".yellow());
        let result = with_slow_hint(lookup(source, query), slow_hint, || {
            println!(" {}", SLOW_HINT.truecolor(255, 165, 0));
        })
        .await;

        match result {
            Ok(records) => render_results(&records, &mut palette),
            Err(e) => {
                log::debug!("lookup for {} failed: {:?}", query, e);
                render_error(&e.to_string());
            }
        }
    }

    Ok(())
}
