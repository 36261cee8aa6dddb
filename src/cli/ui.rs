use crate::core::Translator;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    ResultValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::ResultValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// A right-aligned numeric cell.
pub fn value_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// A right-aligned numeric cell drawn in bold green.
pub fn highlight_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Two-column label/value table.
pub fn key_value_table(header: (&str, &str), rows: &[(String, String)]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell(header.0), header_cell(header.1)]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value_cell(value)]);
    }
    table
}

/// Localized "title: description" error line.
pub fn error_message(translator: &Translator, title_key: &str, desc_key: &str) -> String {
    format!(
        "{}: {}",
        style_text(&translator.t(title_key), StyleType::Error),
        translator.t(desc_key)
    )
}

/// Placeholder panel shown once the interaction threshold is crossed.
pub fn advertisement_panel(translator: &Translator) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell(&translator.t("advertisement"))]);
    table.add_row(vec![
        Cell::new(translator.t("adPlaceholder"))
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Center),
    ]);
    table.to_string()
}

/// Creates a spinner shown while waiting on the network.
pub fn new_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Formats a money-like value with two fractional digits.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
