use std::fmt;

use crate::input::classifier::{classify, classify_subnet, InputKind, SubnetKind};

pub const REASON_ASN: &str = "ASNs are not supported in batch mode";
pub const REASON_NO_PREFIX: &str =
    "IP addresses without prefix length are not supported (use CIDR notation like /24)";
pub const REASON_FORMAT: &str = "Invalid format - expected IPv4 or IPv6 subnet in CIDR notation";

/// A rejected batch input line. `line` counts non-blank lines only, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub line: usize,
    pub content: String,
    pub reason: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: \"{}\" - {}", self.line, self.content, self.reason)
    }
}

/// Outcome of validating a batch input file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchInput {
    pub subnets: Vec<String>,
    pub errors: Vec<ValidationError>,
}

impl BatchInput {
    /// A batch runs only when every line is a subnet.
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Partition raw batch text into accepted subnets and line-numbered rejections.
pub fn validate_batch_input(content: &str) -> BatchInput {
    let mut input = BatchInput::default();

    let lines = content.lines().map(str::trim).filter(|line| !line.is_empty());

    for (index, line) in lines.enumerate() {
        match classify_subnet(line) {
            SubnetKind::Ipv4Subnet | SubnetKind::Ipv6Subnet => input.subnets.push(line.to_string()),
            SubnetKind::Invalid => input.errors.push(ValidationError {
                line: index + 1,
                content: line.to_string(),
                reason: rejection_reason(line),
            }),
        }
    }

    input
}

fn rejection_reason(line: &str) -> &'static str {
    match classify(line) {
        InputKind::Asn(_) => REASON_ASN,
        InputKind::Ipv4 | InputKind::Ipv6 => REASON_NO_PREFIX,
        InputKind::Invalid => REASON_FORMAT,
    }
}
