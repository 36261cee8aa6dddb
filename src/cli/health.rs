use super::{BmiArgs, CaloriesArgs, parse_count, parse_number, ui};
use crate::core::forms::HealthForm;
use crate::core::health::{self, BmiCategory};
use crate::session::Session;
use comfy_table::Cell;
use tracing::debug;

fn invalid(session: &Session) -> String {
    ui::error_message(session.translator(), "invalidInput", "invalidInputDesc")
}

pub fn bmi(session: &mut Session, args: BmiArgs) -> String {
    let mut form = session.form::<HealthForm>();
    form.update(|state| {
        if let Some(v) = args.height {
            state.height = v;
        }
        if let Some(v) = args.weight {
            state.weight = v;
        }
    });
    let state = form.get();
    debug!(?state, "Health form");

    let result = match (parse_number(&state.weight), parse_number(&state.height)) {
        (Some(weight), Some(height)) => health::bmi(weight, height),
        _ => None,
    };
    let Some(result) = result else {
        return invalid(session);
    };

    let t = session.translator();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&t.t("bmiCategory")),
        ui::header_cell(&t.t("bmiRange")),
    ]);
    for category in BmiCategory::ALL {
        let (name, range) = (t.t(category.label_key()), t.t(category.range_key()));
        if category == result.category {
            table.add_row(vec![
                Cell::new(format!("▶ {name}")).fg(comfy_table::Color::Green),
                ui::highlight_cell(&range),
            ]);
        } else {
            table.add_row(vec![Cell::new(name), ui::value_cell(&range)]);
        }
    }

    format!(
        "{}\n{}: {} ({})\n{}",
        ui::style_text(&t.t("bmiCalculator"), ui::StyleType::Title),
        t.t("yourBmi"),
        ui::style_text(&format!("{:.1}", result.value), ui::StyleType::ResultValue),
        t.t(result.category.label_key()),
        table
    )
}

pub fn calories(session: &mut Session, args: CaloriesArgs) -> String {
    let mut form = session.form::<HealthForm>();
    form.update(|state| {
        if let Some(v) = args.height {
            state.height = v;
        }
        if let Some(v) = args.weight {
            state.weight = v;
        }
        if let Some(v) = args.age {
            state.age = v;
        }
        if let Some(v) = args.gender {
            state.gender = v;
        }
    });
    let state = form.get();
    debug!(?state, "Health form");

    let result = match (
        parse_number(&state.weight),
        parse_number(&state.height),
        parse_count(&state.age),
    ) {
        (Some(weight), Some(height), Some(age)) => {
            health::daily_calories(weight, height, age, state.gender)
        }
        _ => None,
    };
    let Some(calories) = result else {
        return invalid(session);
    };

    let t = session.translator();
    format!(
        "{}\n{}: {} kcal\n{}",
        ui::style_text(&t.t("calorieCalculator"), ui::StyleType::Title),
        t.t("estDailyCalories"),
        ui::style_text(&calories.to_string(), ui::StyleType::ResultValue),
        ui::style_text(&t.t("sedentaryLifestyle"), ui::StyleType::Subtle),
    )
}
