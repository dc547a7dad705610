use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::{CoreError, CoreResult, Offer};

/// A declarative constraint on one field of an [`Offer`].
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    holds: fn(&Offer) -> bool,
    rejected: fn(&Offer) -> String,
}

/// A rule that did not hold for a given offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub invalid_value: String,
    pub message: &'static str,
}

pub const OFFER_RULES: &[FieldRule] = &[
    FieldRule {
        field: "product",
        message: "must not be empty",
        holds: product_not_empty,
        rejected: product_value,
    },
    FieldRule {
        field: "price",
        message: "must be greater than or equal to 0",
        holds: price_positive_or_zero,
        rejected: price_value,
    },
    FieldRule {
        field: "start",
        message: "must not be null",
        holds: start_present,
        rejected: start_value,
    },
    FieldRule {
        field: "end",
        message: "must not be null",
        holds: end_present,
        rejected: end_value,
    },
];

fn product_not_empty(offer: &Offer) -> bool {
    !offer.product.is_empty()
}

// An unset price passes.
fn price_positive_or_zero(offer: &Offer) -> bool {
    offer.price.map_or(true, |p| p >= Decimal::ZERO)
}

fn start_present(offer: &Offer) -> bool {
    offer.start.is_some()
}

fn end_present(offer: &Offer) -> bool {
    offer.end.is_some()
}

fn product_value(offer: &Offer) -> String {
    format!("{:?}", offer.product)
}

fn price_value(offer: &Offer) -> String {
    render(offer.price)
}

fn start_value(offer: &Offer) -> String {
    render(offer.start)
}

fn end_value(offer: &Offer) -> String {
    render(offer.end)
}

fn render<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Evaluates every field rule against the offer.
pub fn violations(offer: &Offer) -> Vec<Violation> {
    OFFER_RULES
        .iter()
        .filter(|rule| !(rule.holds)(offer))
        .map(|rule| Violation {
            field: rule.field,
            invalid_value: (rule.rejected)(offer),
            message: rule.message,
        })
        .collect()
}

/// Checks the field rules, then the period of validity.
///
/// Violations are logged and short-circuit the period check.
pub fn is_valid(offer: Option<&Offer>) -> bool {
    let Some(offer) = offer else {
        return false;
    };

    let violations = violations(offer);
    if violations.is_empty() {
        return is_period_valid(Some(offer));
    }

    for violation in &violations {
        tracing::info!(
            field = violation.field,
            invalid_value = %violation.invalid_value,
            "{}",
            violation.message
        );
    }
    false
}

/// True when both dates are set and `end` is not before `start`.
pub fn is_period_valid(offer: Option<&Offer>) -> bool {
    match offer {
        Some(Offer { start: Some(start), end: Some(end), .. }) => days_between(*start, *end) >= 0,
        _ => false,
    }
}

/// True once the end date is today or in the past.
pub fn is_expired(offer: Option<&Offer>) -> bool {
    is_expired_on(offer, Local::now().date_naive())
}

pub fn is_expired_on(offer: Option<&Offer>, today: NaiveDate) -> bool {
    match offer.and_then(|o| o.end) {
        Some(end) => days_between(today, end) <= 0,
        None => false,
    }
}

/// A valid offer that also carries a positive id.
pub fn is_storable(offer: Option<&Offer>) -> bool {
    is_valid(offer) && offer.and_then(|o| o.id).is_some_and(|id| id > 0)
}

/// Accepts only identifiers that could have come from an [`crate::IdGenerator`].
pub fn check_id(id: i32) -> CoreResult<i32> {
    if id < 1 {
        return Err(CoreError::InvalidIdentifier(id));
    }
    Ok(id)
}

/// Rejects an offer failing [`is_valid`], naming the violated fields.
pub fn validate(offer: &Offer) -> CoreResult<()> {
    if is_valid(Some(offer)) {
        return Ok(());
    }
    let fields: Vec<&str> = violations(offer).iter().map(|v| v.field).collect();
    let reason = if fields.is_empty() {
        "end is before start".to_string()
    } else {
        fields.join(", ")
    };
    Err(CoreError::Validation(reason))
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
