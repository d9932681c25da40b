//! Reusable field validators
//!
//! Each validator is built once from its bound and then applied to a field
//! value, returning the [`ValidationError`] for that field on failure.

use crate::core::error::{OrderField, ValidationError, ValidationKind};

/// Validator: text field is not empty
pub fn required() -> impl Fn(OrderField, &str) -> Result<(), ValidationError> + Clone {
    |field: OrderField, value: &str| {
        if value.is_empty() {
            Err(ValidationError::new(field, ValidationKind::Required))
        } else {
            Ok(())
        }
    }
}

/// Validator: text field has at least `min` characters
pub fn min_length(min: usize) -> impl Fn(OrderField, &str) -> Result<(), ValidationError> + Clone {
    move |field: OrderField, value: &str| {
        if value.chars().count() < min {
            Err(ValidationError::new(field, ValidationKind::TooShort { min }))
        } else {
            Ok(())
        }
    }
}

/// Parse the leading whole number of a form value
///
/// Leading whitespace and an optional sign are accepted, and parsing stops at
/// the first non-digit, so `"2.5"` is 2 and `"5 items"` is 5. Values too large
/// for `i64` saturate and are left to the range checks.
pub fn parse_integer(field: OrderField, value: &str) -> Result<i64, ValidationError> {
    let value = value.trim_start();
    let (negative, rest) = split_sign(value);
    let digits = leading_digits(rest);
    if digits == 0 {
        return Err(ValidationError::new(field, ValidationKind::NotANumber));
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    Ok(value[..value.len() - rest.len() + digits]
        .parse::<i64>()
        .unwrap_or(saturated))
}

/// Parse the leading decimal number of a form value
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]` and ignores whatever
/// follows, so `"2.5km"` is 2.5. `NaN`, infinities and values that overflow
/// count as not a number.
pub fn parse_number(field: OrderField, value: &str) -> Result<f64, ValidationError> {
    let not_a_number = || ValidationError::new(field, ValidationKind::NotANumber);
    let value = value.trim_start();
    let (_, rest) = split_sign(value);

    let whole = leading_digits(rest);
    let mut end = whole;
    let mut fraction = 0;
    if rest[end..].starts_with('.') {
        fraction = leading_digits(&rest[end + 1..]);
        end += 1 + fraction;
    }
    if whole + fraction == 0 {
        return Err(not_a_number());
    }

    if let Some(exp) = rest[end..].strip_prefix(['e', 'E']) {
        let (_, exp_digits) = split_sign(exp);
        let n = leading_digits(exp_digits);
        if n > 0 {
            end += 1 + (exp.len() - exp_digits.len()) + n;
        }
    }

    let literal = &value[..value.len() - rest.len() + end];
    match literal.parse::<f64>() {
        Ok(num) if num.is_finite() => Ok(num),
        _ => Err(not_a_number()),
    }
}

fn split_sign(value: &str) -> (bool, &str) {
    match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    }
}

fn leading_digits(value: &str) -> usize {
    value.bytes().take_while(u8::is_ascii_digit).count()
}

/// Validator: number is at least `min`
pub fn min_value(min: f64) -> impl Fn(OrderField, f64) -> Result<(), ValidationError> + Clone {
    move |field: OrderField, value: f64| {
        if value < min {
            Err(ValidationError::new(field, ValidationKind::BelowMinimum { min }))
        } else {
            Ok(())
        }
    }
}

/// Validator: number does not exceed `max`
pub fn max_value(max: f64) -> impl Fn(OrderField, f64) -> Result<(), ValidationError> + Clone {
    move |field: OrderField, value: f64| {
        if value > max {
            Err(ValidationError::new(field, ValidationKind::AboveMaximum { max }))
        } else {
            Ok(())
        }
    }
}

/// Validator: number is strictly positive
pub fn positive() -> impl Fn(OrderField, f64) -> Result<(), ValidationError> + Clone {
    |field: OrderField, value: f64| {
        if value <= 0.0 {
            Err(ValidationError::new(field, ValidationKind::NotPositive))
        } else {
            Ok(())
        }
    }
}
