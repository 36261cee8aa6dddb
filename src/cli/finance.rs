use super::{InterestArgs, LoanArgs, TipArgs, parse_count, parse_number, ui};
use crate::core::finance;
use crate::core::forms::{InterestForm, LoanForm, TipForm};
use crate::session::Session;
use tracing::debug;

fn percent(raw: &str) -> Option<f64> {
    parse_number(raw).map(|p| p / 100.0)
}

fn render(session: &Session, title_key: &str, rows: Vec<(&str, f64)>) -> String {
    let t = session.translator();
    let rows: Vec<(String, String)> = rows
        .into_iter()
        .map(|(key, value)| (t.t(key), ui::format_amount(value)))
        .collect();
    format!(
        "{}\n{}",
        ui::style_text(&t.t(title_key), ui::StyleType::Title),
        ui::key_value_table((&t.t("result"), &t.t("value")), &rows)
    )
}

fn invalid(session: &Session) -> String {
    ui::error_message(session.translator(), "invalidInput", "invalidInputDesc")
}

pub fn interest(session: &mut Session, args: InterestArgs) -> String {
    let mut form = session.form::<InterestForm>();
    form.update(|state| {
        if let Some(v) = args.principal {
            state.principal = v;
        }
        if let Some(v) = args.rate {
            state.rate = v;
        }
        if let Some(v) = args.time {
            state.time = v;
        }
        if let Some(v) = args.compounds_per_year {
            state.compounds_per_year = v;
        }
    });
    let state = form.get();
    debug!(?state, compound = args.compound, "Interest form");

    let (principal, rate, time) = match (
        parse_number(&state.principal),
        percent(&state.rate),
        parse_number(&state.time),
    ) {
        (Some(p), Some(r), Some(t)) => (p, r, t),
        _ => return invalid(session),
    };

    // Compounding frequency only applies to compound interest
    let (title_key, result) = if args.compound {
        let result = parse_count(&state.compounds_per_year)
            .and_then(|n| finance::compound_interest(principal, rate, time, n));
        ("compoundInterest", result)
    } else {
        ("simpleInterest", finance::simple_interest(principal, rate, time))
    };

    match result {
        Some(r) => render(
            session,
            title_key,
            vec![("totalInterest", r.interest), ("totalValue", r.total)],
        ),
        None => invalid(session),
    }
}

pub fn loan(session: &mut Session, args: LoanArgs) -> String {
    let mut form = session.form::<LoanForm>();
    form.update(|state| {
        if let Some(v) = args.amount {
            state.amount = v;
        }
        if let Some(v) = args.rate {
            state.rate = v;
        }
        if let Some(v) = args.term {
            state.term = v;
        }
    });
    let state = form.get();
    debug!(?state, "Loan form");

    let result = match (
        parse_number(&state.amount),
        percent(&state.rate),
        parse_number(&state.term),
    ) {
        (Some(amount), Some(rate), Some(term)) => finance::loan_payment(amount, rate, term),
        _ => None,
    };

    match result {
        Some(r) => render(
            session,
            "loanCalculator",
            vec![
                ("monthlyPayment", r.monthly_payment),
                ("totalInterest", r.total_interest),
                ("totalPayment", r.total_payment),
            ],
        ),
        None => invalid(session),
    }
}

pub fn tip(session: &mut Session, args: TipArgs) -> String {
    let mut form = session.form::<TipForm>();
    form.update(|state| {
        if let Some(v) = args.bill {
            state.bill = v;
        }
        if let Some(v) = args.percent {
            state.tip_percent = v;
        }
        if let Some(v) = args.people {
            state.people = v;
        }
    });
    let state = form.get();
    debug!(?state, "Tip form");

    let result = match (
        parse_number(&state.bill),
        percent(&state.tip_percent),
        parse_count(&state.people),
    ) {
        (Some(bill), Some(rate), Some(people)) => finance::tip_split(bill, rate, people),
        _ => None,
    };

    match result {
        Some(r) => render(
            session,
            "tipCalculator",
            vec![
                ("tipAmount", r.tip_amount),
                ("totalBill", r.total),
                ("totalPerPerson", r.per_person),
            ],
        ),
        None => invalid(session),
    }
}
