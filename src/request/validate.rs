//! Request validation
//!
//! Bounds-checks every numeric field and normalizes the ZIP code. Produces a
//! [`ValidatedRequest`] or an `InvalidRequest` naming the offending field.

use super::{AnalysisRequest, HomeFeatures, ValidatedRequest};
use crate::error::{AnalysisError, Result};

/// Longest supported projection
pub const MAX_HORIZON_YEARS: u32 = 30;

/// Validate and normalize a raw request
pub fn validate(req: &AnalysisRequest) -> Result<ValidatedRequest> {
    let zip = normalize_zip(&req.zip)?;

    require_finite("current_price", req.current_price)?;
    require_finite("offer_price", req.offer_price)?;
    require_finite("down_payment_pct", req.down_payment_pct)?;
    require_finite("income", req.income)?;
    require_finite("risk_tolerance", req.risk_tolerance)?;

    if req.current_price <= 0.0 {
        return Err(AnalysisError::invalid("current_price must be greater than 0"));
    }
    if req.offer_price <= 0.0 {
        return Err(AnalysisError::invalid("offer_price must be greater than 0"));
    }
    if !(0.0..=1.0).contains(&req.down_payment_pct) {
        return Err(AnalysisError::invalid(
            "down_payment_pct must be between 0 and 1",
        ));
    }
    if req.income <= 0.0 {
        return Err(AnalysisError::invalid("income must be greater than 0"));
    }
    if req.horizon_years < 1 {
        return Err(AnalysisError::invalid("horizon_years must be at least 1"));
    }
    if req.horizon_years > MAX_HORIZON_YEARS {
        return Err(AnalysisError::invalid(format!(
            "horizon_years must be at most {}",
            MAX_HORIZON_YEARS
        )));
    }
    if !(0.0..=1.0).contains(&req.risk_tolerance) {
        return Err(AnalysisError::invalid(
            "risk_tolerance must be between 0 and 1",
        ));
    }
    if let Some(features) = &req.home_features {
        validate_features(features)?;
    }

    Ok(ValidatedRequest {
        zip,
        current_price: req.current_price,
        offer_price: req.offer_price,
        down_payment_pct: req.down_payment_pct,
        income: req.income,
        horizon_years: req.horizon_years,
        risk_tolerance: req.risk_tolerance,
        home_features: req.home_features.clone(),
        seed: req.seed,
    })
}

/// Normalize a ZIP to its 5-digit form
///
/// Accepts `12345` and `12345-6789`, ignoring surrounding whitespace.
pub fn normalize_zip(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let (base, plus4) = match trimmed.split_once('-') {
        Some((base, ext)) => (base, Some(ext)),
        None => (trimmed, None),
    };

    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

    if !is_digits(base, 5) || plus4.is_some_and(|ext| !is_digits(ext, 4)) {
        return Err(AnalysisError::invalid(format!(
            "zip must be a 5-digit ZIP code, got {:?}",
            raw
        )));
    }

    Ok(base.to_string())
}

fn validate_features(features: &HomeFeatures) -> Result<()> {
    if !features.sqft.is_finite() || features.sqft <= 0.0 {
        return Err(AnalysisError::invalid(
            "home_features.sqft must be greater than 0",
        ));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid(format!("{} must be a finite number", field)))
    }
}
