//! Validation utilities for HarvestGuard
//!
//! Includes Bangladesh-specific validations for farmer accounts.

use rust_decimal::Decimal;

use crate::models::{CropBatchUpdate, NewCropBatch};

// ============================================================================
// Crop Batch Validations
// ============================================================================

/// Validate a batch weight in kilograms
pub fn validate_weight(weight: Decimal) -> Result<(), &'static str> {
    if weight <= Decimal::ZERO {
        return Err("Weight must be greater than zero");
    }
    Ok(())
}

/// Validate input for a new crop batch
pub fn validate_new_batch(input: &NewCropBatch) -> Result<(), &'static str> {
    validate_weight(input.weight)
}

/// Validate a partial batch update
pub fn validate_batch_update(update: &CropBatchUpdate) -> Result<(), &'static str> {
    match update.weight {
        Some(weight) => validate_weight(weight),
        None => Ok(()),
    }
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Validate Bangladeshi mobile number format
/// Accepts: 01712345678, 017-1234-5678, +8801712345678
pub fn validate_bangladesh_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.strip_prefix("88") {
        Some(rest) if digits.len() == 13 => rest,
        _ => digits.as_str(),
    };

    // Mobile operators use 013 through 019
    let valid = local.len() == 11
        && local.starts_with("01")
        && matches!(local.as_bytes()[2], b'3'..=b'9');

    if valid {
        Ok(())
    } else {
        Err("Invalid Bangladeshi mobile number format")
    }
}
