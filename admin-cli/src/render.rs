use admin_client::presentation::{BadgeVariant, Cell, Column, SummaryCard};
use admin_client::Banners;
use colored::{ColoredString, Colorize};

fn paint(text: &str, variant: Option<BadgeVariant>) -> ColoredString {
    match variant {
        Some(BadgeVariant::Primary) => text.blue(),
        Some(BadgeVariant::Secondary) => text.bright_black(),
        Some(BadgeVariant::Success) => text.green(),
        Some(BadgeVariant::Danger) => text.red(),
        Some(BadgeVariant::Warning) => text.yellow(),
        Some(BadgeVariant::Info) => text.cyan(),
        None => text.normal(),
    }
}

pub fn banners(banners: Banners<'_>) {
    if let Some(message) = banners.success {
        println!("{} {}", "✅ Success:".green().bold(), message);
    }
    if let Some(message) = banners.error {
        println!("{} {}", "❌ Error:".red().bold(), message);
    }
}

pub fn cards(cards: &[SummaryCard]) {
    let line: Vec<String> = cards
        .iter()
        .map(|card| {
            format!(
                "{}: {}",
                paint(card.label, card.variant),
                card.value.to_string().bold()
            )
        })
        .collect();
    println!("   {}", line.join("  |  "));
    println!();
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn truncate(s: &str, max_len: usize) -> String {
    if width(s) <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Prints a padded table; badge cells are coloured after padding so escape
/// codes do not skew the widths.
pub fn table(columns: &[Column], rows: &[Vec<Cell>], max_cell: usize) {
    if rows.is_empty() {
        println!("   No records found");
        return;
    }

    let texts: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(&cell.to_string(), max_cell)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            texts
                .iter()
                .filter_map(|row| row.get(i))
                .map(|text| width(text))
                .chain(std::iter::once(width(column.header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, w)| format!("{:<w$}", column.header, w = *w))
        .collect();
    println!("   {}", header.join("  ").bold());

    for (row, text) in rows.iter().zip(&texts) {
        let line: Vec<String> = row
            .iter()
            .zip(text)
            .zip(&widths)
            .map(|((cell, text), w)| {
                let padded = format!("{:<w$}", text, w = *w);
                paint(&padded, cell.badge().and_then(|b| b.variant)).to_string()
            })
            .collect();
        println!("   {}", line.join("  "));
    }
}
