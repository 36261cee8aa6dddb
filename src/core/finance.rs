//! Interest, loan and tip calculations.
//!
//! Rates are fractions (`0.05` for 5%). Every function returns `None` when
//! its inputs are not usable instead of producing NaN or infinity.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestResult {
    pub interest: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipResult {
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
}

impl InterestResult {
    fn finite(self) -> Option<Self> {
        (self.interest.is_finite() && self.total.is_finite()).then_some(self)
    }
}

impl LoanResult {
    fn finite(self) -> Option<Self> {
        (self.monthly_payment.is_finite()
            && self.total_payment.is_finite()
            && self.total_interest.is_finite())
        .then_some(self)
    }
}

impl TipResult {
    fn finite(self) -> Option<Self> {
        (self.tip_amount.is_finite() && self.total.is_finite() && self.per_person.is_finite())
            .then_some(self)
    }
}

fn valid_terms(principal: f64, rate: f64, years: f64) -> bool {
    principal.is_finite()
        && rate.is_finite()
        && years.is_finite()
        && principal > 0.0
        && rate >= 0.0
        && years >= 0.0
}

pub fn simple_interest(principal: f64, rate: f64, years: f64) -> Option<InterestResult> {
    if !valid_terms(principal, rate, years) {
        return None;
    }
    let interest = principal * rate * years;
    InterestResult {
        interest,
        total: principal + interest,
    }
    .finite()
}

pub fn compound_interest(
    principal: f64,
    rate: f64,
    years: f64,
    compounds_per_year: u32,
) -> Option<InterestResult> {
    if !valid_terms(principal, rate, years) || compounds_per_year == 0 {
        return None;
    }
    let n = f64::from(compounds_per_year);
    let total = principal * (1.0 + rate / n).powf(n * years);
    InterestResult {
        interest: total - principal,
        total,
    }
    .finite()
}

/// Fixed monthly payment for an amortized loan.
pub fn loan_payment(principal: f64, annual_rate: f64, term_years: f64) -> Option<LoanResult> {
    if !valid_terms(principal, annual_rate, term_years) {
        return None;
    }
    let months = term_years * 12.0;
    if months < 1.0 {
        return None;
    }
    let r = annual_rate / 12.0;
    let monthly_payment = if r == 0.0 {
        principal / months
    } else {
        // Tends to P·r as the term grows
        principal * r / (1.0 - (1.0 + r).powf(-months))
    };
    let total_payment = monthly_payment * months;
    LoanResult {
        monthly_payment,
        total_payment,
        total_interest: total_payment - principal,
    }
    .finite()
}

pub fn tip_split(bill: f64, tip_rate: f64, people: u32) -> Option<TipResult> {
    if !bill.is_finite() || !tip_rate.is_finite() || bill < 0.0 || tip_rate < 0.0 || people < 1 {
        return None;
    }
    let tip_amount = bill * tip_rate;
    let total = bill + tip_amount;
    TipResult {
        tip_amount,
        total,
        per_person: total / f64::from(people),
    }
    .finite()
}
