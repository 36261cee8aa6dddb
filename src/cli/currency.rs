use super::{CurrencyArgs, ui};
use crate::core::converter::{ConversionError, ConversionRequest, RateConverter};
use crate::core::forms::CurrencyForm;
use crate::core::quote::{SUPPORTED_CURRENCIES, is_supported};
use crate::session::Session;
use comfy_table::Cell;
use tracing::{debug, warn};

pub async fn run(session: &mut Session, args: CurrencyArgs) -> String {
    let mut form = session.form::<CurrencyForm>();
    form.update(|state| {
        if let Some(amount) = args.amount {
            state.amount = amount;
        }
        if let Some(from) = args.from {
            state.from = from.trim().to_uppercase();
        }
        if let Some(to) = args.to {
            state.to = to.trim().to_uppercase();
        }
        if args.swap {
            state.swap();
        }
    });
    let state = form.get().clone();
    debug!(?state, "Currency form");

    let mut output = String::new();
    if session.record_interaction() {
        output.push_str(&ui::advertisement_panel(session.translator()));
        output.push('\n');
    }

    let t = session.translator();
    for code in [&state.from, &state.to] {
        if !is_supported(code) {
            output.push_str(&ui::style_text(
                &t.t_with("unsupportedCurrency", &[("code", code.as_str())]),
                ui::StyleType::Error,
            ));
            return output;
        }
    }

    let request = match ConversionRequest::parse(&state.amount, &state.from, &state.to) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected input: {}", e);
            output.push_str(&ui::error_message(t, "invalidAmount", "invalidAmountDesc"));
            return output;
        }
    };

    let spinner = ui::new_spinner(t.t("fetchingRates"));
    let result = RateConverter::new(session.quote_provider())
        .convert(&request)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(converted) => {
            output.push_str(&format!(
                "{}\n{}\n{}",
                ui::style_text(&t.t("currencyConverter"), ui::StyleType::Title),
                ui::style_text(&converted.to_string(), ui::StyleType::ResultValue),
                ui::style_text(
                    &format!("{} {} {}", state.amount.trim(), request.from(), t.t("equals")),
                    ui::StyleType::Subtle
                ),
            ));
        }
        Err(e @ ConversionError::QuoteUnavailable { .. }) => {
            warn!("Conversion error: {}", e);
            output.push_str(&ui::error_message(t, "conversionFailed", "conversionFailedDesc"));
        }
        Err(e) => {
            debug!("Rejected input: {}", e);
            output.push_str(&ui::error_message(t, "invalidAmount", "invalidAmountDesc"));
        }
    }
    output
}

pub fn list(session: &Session) -> String {
    let t = session.translator();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&t.t("currencyCode")),
        ui::header_cell(&t.t("currencyName")),
    ]);
    for (code, name) in SUPPORTED_CURRENCIES {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }
    table.to_string()
}
