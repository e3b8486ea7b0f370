use std::collections::HashMap;

use colored::{Color, Colorize};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::models::{IrrRoute, MessageCategory, PrefixData, RpkiStatus};
use crate::origin::reconcile::{reconcile, OriginMap};

/// Fixed colors for well-known registries.
const REGISTRY_COLORS: [(&str, Color); 12] = [
    ("RIPE", Color::Blue),
    ("RADB", Color::Green),
    ("ARIN", Color::Magenta),
    ("LACNIC", Color::Yellow),
    ("APNIC", Color::Cyan),
    ("AFRINIC", Color::Red),
    ("RPKI", Color::White),
    ("ALTDB", Color::BrightBlack),
    ("BELL", Color::BrightBlue),
    ("LEVEL3", Color::BrightGreen),
    ("NTTCOM", Color::BrightMagenta),
    ("TC", Color::BrightYellow),
];

/// Handed out round-robin to registries not in [`REGISTRY_COLORS`].
const EXTRA_COLORS: [Color; 4] = [
    Color::BrightRed,
    Color::BrightCyan,
    Color::BrightWhite,
    Color::BrightBlack,
];

/// Registry → color assignment. Unseen names keep the color they first got for
/// as long as the palette lives (one interactive session).
#[derive(Debug, Default)]
pub struct IrrPalette {
    assigned: HashMap<String, Color>,
    next: usize,
}

impl IrrPalette {
    pub fn color_for(&mut self, registry: &str) -> Color {
        if let Some((_, color)) = REGISTRY_COLORS.iter().find(|(name, _)| *name == registry) {
            return *color;
        }
        if let Some(color) = self.assigned.get(registry) {
            return *color;
        }
        let color = EXTRA_COLORS[self.next % EXTRA_COLORS.len()];
        self.next += 1;
        self.assigned.insert(registry.to_string(), color);
        color
    }
}

fn status_color(status: Option<RpkiStatus>) -> comfy_table::Color {
    match status {
        Some(RpkiStatus::Valid) => comfy_table::Color::Green,
        Some(RpkiStatus::Invalid) => comfy_table::Color::Red,
        _ => comfy_table::Color::Yellow,
    }
}

/// Badge text and color for the overall category of a prefix.
pub fn category_badge(category: &MessageCategory) -> (&'static str, Color) {
    match category {
        MessageCategory::Success => ("VALID", Color::Green),
        MessageCategory::Warning => ("WARNING", Color::Yellow),
        MessageCategory::Danger => ("INVALID", Color::Red),
        MessageCategory::Info => ("OK", Color::Blue),
        MessageCategory::Other => ("OTHER", Color::BrightBlack),
    }
}

fn message_color(category: &MessageCategory) -> Color {
    match category {
        MessageCategory::Success => Color::Green,
        MessageCategory::Warning => Color::Yellow,
        MessageCategory::Danger => Color::Red,
        _ => Color::Blue,
    }
}

/// Print one prefix record with its reconciled origins.
pub fn render_prefix(data: &PrefixData, palette: &mut IrrPalette) {
    let origins = reconcile(data);
    let (badge, badge_color) = category_badge(&data.category_overall);

    println!(
        "\n {} {} {}   Score: {}",
        data.prefix.cyan().bold(),
        format!("({})", data.rir.as_deref().unwrap_or("unknown RIR")).bright_black(),
        format!("[{}]", badge).color(badge_color).bold(),
        data.goodness_overall.to_string().white().bold()
    );

    if origins.is_empty() {
        println!(" {} {}", "Origins:".yellow().bold(), "None".bright_black());
    } else {
        println!(" {}", format!("Origins ({}):", origins.len()).yellow().bold());
        println!("{}", origin_table(&origins));
    }

    println!(" {} {}", "BGP:".yellow().bold(), bgp_line(data));
    println!(" {} {}", "RPKI:".yellow().bold(), rpki_line(data, palette));
    println!(" {} {}", "IRR:".yellow().bold(), irr_line(data, palette));

    if !data.messages.is_empty() {
        let messages: Vec<String> = data
            .messages
            .iter()
            .map(|m| m.text.color(message_color(&m.category)).to_string())
            .collect();
        println!(" {} {}", "Messages:".yellow().bold(), messages.join(" | "));
    }
}

/// Print every record with a "Result i of N" header.
pub fn render_results(records: &[PrefixData], palette: &mut IrrPalette) {
    if records.is_empty() {
        println!("\n {}", "No route data found.".yellow());
        return;
    }
    for (i, data) in records.iter().enumerate() {
        println!(
            "\n {}",
            format!("Result {} of {}", i + 1, records.len()).green()
        );
        render_prefix(data, palette);
    }
}

/// Red bordered panel used for lookup failures.
pub fn render_error(message: &str) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .add_row(vec![Cell::new(message).fg(comfy_table::Color::Red)]);
    println!("{}", table);
}

fn origin_table(origins: &OriginMap) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Origin").add_attribute(Attribute::Bold),
            Cell::new("Sources").add_attribute(Attribute::Bold),
            Cell::new("RPKI").add_attribute(Attribute::Bold),
            Cell::new("BGP").add_attribute(Attribute::Bold),
        ]);

    for entry in origins.iter() {
        table.add_row(vec![
            Cell::new(format!("AS{}", entry.asn)),
            Cell::new(entry.sources().join(", ")),
            Cell::new(entry.status_label()).fg(status_color(entry.rpki_status)),
            Cell::new(if entry.is_bgp_origin { "✓" } else { "" })
                .set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

fn bgp_line(data: &PrefixData) -> String {
    if data.bgp_origins.is_empty() {
        return "None".bright_black().to_string();
    }
    data.bgp_origins
        .iter()
        .map(|asn| {
            let valid = data
                .rpki_routes
                .iter()
                .find(|r| r.asn == *asn)
                .is_some_and(|r| r.rpki_status == RpkiStatus::Valid);
            if valid {
                format!("AS{}{}", asn, "✓".green())
            } else {
                format!("AS{}", asn)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rpki_line(data: &PrefixData, palette: &mut IrrPalette) -> String {
    if data.rpki_routes.is_empty() {
        return "None".bright_black().to_string();
    }
    let rpki_color = palette.color_for("RPKI");
    data.rpki_routes
        .iter()
        .map(|route| {
            let mark = match route.rpki_status {
                RpkiStatus::Valid => "✓".green(),
                RpkiStatus::Invalid => "✗".red(),
                RpkiStatus::NotFound => "✗".yellow(),
            };
            let max_length = match route.rpki_max_length {
                0 => String::new(),
                len => format!("/{}", len).bright_black().to_string(),
            };
            format!("{}{}{}", format!("AS{}", route.asn).color(rpki_color), mark, max_length)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any INVALID route marks the whole registry red.
fn registry_color(registry: &str, routes: &[IrrRoute], palette: &mut IrrPalette) -> Color {
    if routes.iter().any(|r| r.rpki_status == RpkiStatus::Invalid) {
        Color::Red
    } else {
        palette.color_for(registry)
    }
}

fn irr_line(data: &PrefixData, palette: &mut IrrPalette) -> String {
    if data.irr_routes.is_empty() {
        return "None".bright_black().to_string();
    }
    data.irr_routes
        .iter()
        .map(|(registry, routes)| {
            let color = registry_color(registry, routes, palette);
            format!(
                "{}{}",
                registry.color(color),
                format!("({})", routes.len()).bright_black()
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
