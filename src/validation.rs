//! Field checks shared by the REST and admin write paths.

use rust_decimal::Decimal;

use crate::error::AppError;

pub fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::BadRequest("latitude must be between -90 and 90".into()));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest(
            "longitude must be between -180 and 180".into(),
        ));
    }
    Ok(())
}

pub fn optional_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), AppError> {
    coordinates(latitude.unwrap_or_default(), longitude.unwrap_or_default())
}

pub fn positive(field: &str, value: Decimal) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::BadRequest(format!("{field} must be greater than 0")));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: Decimal) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

pub fn non_negative_int(field: &str, value: i32) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Checks that `value` fits a `NUMERIC(precision, scale)` column.
pub fn fits_numeric(field: &str, value: Decimal, precision: u32, scale: u32) -> Result<(), AppError> {
    if value.scale() > scale {
        return Err(AppError::BadRequest(format!(
            "{field} allows at most {scale} decimal places"
        )));
    }
    let integer_digits = value.trunc().abs().to_string().trim_start_matches('0').len() as u32;
    if integer_digits > precision - scale {
        return Err(AppError::BadRequest(format!(
            "{field} allows at most {} digits before the decimal point",
            precision - scale
        )));
    }
    Ok(())
}

pub fn rating(value: Decimal) -> Result<(), AppError> {
    if value < Decimal::ZERO || value > Decimal::from(5) {
        return Err(AppError::BadRequest("rating must be between 0 and 5".into()));
    }
    Ok(())
}

pub fn phone(value: &str) -> Result<(), AppError> {
    required("phone", value)?;
    max_len("phone", value, 20)
}
