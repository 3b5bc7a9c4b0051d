//! Analysis request types and input validation

mod validate;

pub use validate::{normalize_zip, validate};

use serde::{Deserialize, Serialize};

/// Optional physical features of the home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeFeatures {
    pub sqft: f64,
    pub beds: u32,
    pub baths: u32,
    #[serde(default = "default_property_type")]
    pub property_type: String,
}

fn default_property_type() -> String {
    "single_family".to_string()
}

/// Raw `/analyze` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// ZIP code, 5 digits or ZIP+4
    pub zip: String,
    /// Current market value of the home
    pub current_price: f64,
    /// Buyer's offer price
    pub offer_price: f64,
    /// Down payment as a fraction of the offer (0-1)
    pub down_payment_pct: f64,
    /// Annual household income
    pub income: f64,
    /// Years to project forward
    pub horizon_years: u32,
    /// Buyer's risk tolerance (0-1)
    pub risk_tolerance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_features: Option<HomeFeatures>,
    /// Root seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Normalized 5-digit ZIP
    pub zip: String,
    pub current_price: f64,
    pub offer_price: f64,
    pub down_payment_pct: f64,
    pub income: f64,
    pub horizon_years: u32,
    pub risk_tolerance: f64,
    pub home_features: Option<HomeFeatures>,
    pub seed: Option<u64>,
}
