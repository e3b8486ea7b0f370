use std::io;
use std::path::Path;

use crate::models::BatchResult;

pub const CSV_HEADER: &str = "subnet,origin,rpki";

/// Render batch rows as `subnet,origin,rpki` CSV. The subnet is always quoted.
pub fn render(results: &[BatchResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(
        results
            .iter()
            .map(|r| format!("\"{}\",AS{},{}", r.subnet, r.origin, r.rpki)),
    );
    lines.join("\n")
}

/// Write rendered rows to `path`.
pub fn write(results: &[BatchResult], path: &Path) -> io::Result<()> {
    std::fs::write(path, render(results))
}
