//! Mortgage affordability
//!
//! Debt-to-income of a fixed-rate amortizing loan on the offer, and a 0-1
//! stress level scaled linearly between the safe and stressed DTI guidelines.

use crate::config::AffordabilityConfig;
use serde::{Deserialize, Serialize};

/// Affordability of an offer for a buyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    /// Annual mortgage payment
    pub annual_payment: f64,
    /// Annual payment / annual income
    pub debt_to_income: f64,
    /// 0 = comfortable, 1 = severely stretched
    pub stress: f64,
}

/// Computes [`Affordability`]
#[derive(Debug, Clone)]
pub struct AffordabilityCalculator {
    config: AffordabilityConfig,
}

impl AffordabilityCalculator {
    /// Create from AffordabilityConfig
    pub fn from_config(config: &AffordabilityConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Annual payment on `loan` with monthly compounding
    pub fn annual_payment(&self, loan: f64) -> f64 {
        if loan <= 0.0 {
            return 0.0;
        }
        let months = (self.config.term_years.max(1) * 12) as f64;
        let r = self.config.mortgage_rate / 12.0;

        let monthly = if r.abs() < 1e-12 {
            loan / months
        } else {
            loan * r / (1.0 - (1.0 + r).powf(-months))
        };
        monthly * 12.0
    }

    /// Evaluate an offer
    pub fn evaluate(&self, offer_price: f64, down_payment_pct: f64, income: f64) -> Affordability {
        let loan = offer_price * (1.0 - down_payment_pct.clamp(0.0, 1.0));
        let annual_payment = self.annual_payment(loan);

        if income <= 0.0 {
            return Affordability {
                annual_payment,
                debt_to_income: f64::INFINITY,
                stress: 1.0,
            };
        }

        let debt_to_income = annual_payment / income;
        let safe = self.config.safe_dti;
        let stressed = self.config.stressed_dti.max(safe);

        let stress = if debt_to_income <= safe {
            0.0
        } else if debt_to_income >= stressed {
            1.0
        } else {
            (debt_to_income - safe) / (stressed - safe)
        };

        Affordability {
            annual_payment,
            debt_to_income,
            stress,
        }
    }
}

impl Default for AffordabilityCalculator {
    fn default() -> Self {
        Self::from_config(&AffordabilityConfig::default())
    }
}
