use super::{MeasureArgs, parse_number, ui};
use crate::core::forms::{MeasurementEntry, MeasurementForm};
use crate::core::measurement::{self, Category};
use crate::session::Session;
use comfy_table::Cell;
use std::collections::HashMap;

pub fn run(session: &mut Session, args: MeasureArgs) -> String {
    let mut form = session.form::<MeasurementForm>();
    if let Some(unit) = args.unit {
        form.update(|state| {
            let category = unit.category();
            state.active_tab = category;
            match args.value {
                Some(value) => {
                    state.entries.insert(category, MeasurementEntry { unit, value });
                }
                None => {
                    // Switching units without a value keeps the last value typed
                    let value = state
                        .entries
                        .get(&category)
                        .map(|e| e.value.clone())
                        .unwrap_or_default();
                    state.entries.insert(category, MeasurementEntry { unit, value });
                }
            }
        });
    }

    let mut output = String::new();
    if session.record_interaction() {
        output.push_str(&ui::advertisement_panel(session.translator()));
        output.push('\n');
    }

    let state = form.get();
    let category = state.active_tab;
    output.push_str(&render(session, category, state.entries.get(&category)));
    output
}

/// Renders every unit of `category`. Fields stay empty when the entered value
/// is missing or not a number.
fn render(session: &Session, category: Category, entry: Option<&MeasurementEntry>) -> String {
    let t = session.translator();
    let mut values: HashMap<_, String> = HashMap::new();
    if let Some(entry) = entry {
        if let Some(results) = parse_number(&entry.value).and_then(|v| measurement::convert(entry.unit, v)) {
            values.insert(entry.unit, entry.value.trim().to_string());
            for (unit, value) in results {
                values.insert(unit, measurement::format_value(value));
            }
        }
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&t.t("unit")),
        ui::header_cell(&t.t("value")),
    ]);
    for unit in category.units() {
        let value = values.get(unit).cloned().unwrap_or_default();
        let cell = if entry.is_some_and(|e| e.unit == *unit) {
            ui::highlight_cell(&value)
        } else {
            ui::value_cell(&value)
        };
        table.add_row(vec![
            Cell::new(format!("{} ({})", t.t(unit.label_key()), unit.symbol())),
            cell,
        ]);
    }

    format!(
        "{}\n{}",
        ui::style_text(&t.t(category.label_key()), ui::StyleType::Title),
        table
    )
}
