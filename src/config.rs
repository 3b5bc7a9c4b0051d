//! Configuration types for homeconfidence

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub fragility: FragilityConfig,
    #[serde(default)]
    pub fair_value: FairValueConfig,
    #[serde(default)]
    pub affordability: AffordabilityConfig,
    #[serde(default)]
    pub explain: ExplainConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Monte Carlo simulation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Paths per run
    #[serde(default = "default_paths")]
    pub paths: usize,

    /// Simulated periods per year (12 = monthly)
    #[serde(default = "default_steps_per_year")]
    pub steps_per_year: u32,

    /// Generate paths on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Root seed used when the request carries none
    #[serde(default)]
    pub seed: Option<u64>,

    /// Abort a run after this many milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Probability that a path suffers one correction shock (0 disables)
    #[serde(default)]
    pub correction_probability: f64,

    /// Smallest correction drawdown
    #[serde(default = "default_correction_min")]
    pub correction_min: f64,

    /// Largest correction drawdown
    #[serde(default = "default_correction_max")]
    pub correction_max: f64,

    /// Distribution of per-step shocks
    #[serde(default)]
    pub shock_distribution: ShockDistribution,

    /// Degrees of freedom for `student_t` shocks (must exceed 2)
    #[serde(default = "default_shock_df")]
    pub shock_df: f64,
}

/// Per-step shock distribution
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShockDistribution {
    /// Standard normal
    #[default]
    Normal,
    /// Student's t rescaled to unit variance (fat tails)
    StudentT,
}

fn default_true() -> bool {
    true
}
fn default_paths() -> usize {
    1_000
}
fn default_steps_per_year() -> u32 {
    12
}
fn default_timeout_ms() -> u64 {
    5_000
}
fn default_correction_min() -> f64 {
    0.08
}
fn default_correction_max() -> f64 {
    0.20
}
fn default_shock_df() -> f64 {
    5.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            steps_per_year: default_steps_per_year(),
            parallel: true,
            seed: None,
            timeout_ms: default_timeout_ms(),
            correction_probability: 0.0,
            correction_min: default_correction_min(),
            correction_max: default_correction_max(),
            shock_distribution: ShockDistribution::Normal,
            shock_df: default_shock_df(),
        }
    }
}

/// Market data and parameter estimation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// ZHVI-format CSV with monthly values per ZIP
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Index series are smoothed; individual homes are this much more volatile
    #[serde(default = "default_individual_vol_multiplier")]
    pub individual_vol_multiplier: f64,

    /// Extra volatility per unit of price deviation from the ZIP level
    #[serde(default = "default_deviation_vol_factor")]
    pub deviation_vol_factor: f64,

    /// Largest price deviation from the ZIP level that still raises volatility
    #[serde(default = "default_max_price_deviation")]
    pub max_price_deviation: f64,

    /// Minimum monthly observations for a usable ZIP
    #[serde(default = "default_min_history_months")]
    pub min_history_months: usize,

    /// Trailing months used for estimation (0 = full history)
    #[serde(default = "default_history_window_months")]
    pub history_window_months: usize,

    /// Fallback annual drift
    #[serde(default = "default_national_drift")]
    pub national_drift: f64,

    /// Fallback annual volatility (home level)
    #[serde(default = "default_national_volatility")]
    pub national_volatility: f64,

    /// Confidence multiplier applied when the fallback is used
    #[serde(default = "default_fallback_confidence_factor")]
    pub fallback_confidence_factor: f64,
}

fn default_individual_vol_multiplier() -> f64 {
    2.5
}
fn default_deviation_vol_factor() -> f64 {
    0.7
}
fn default_max_price_deviation() -> f64 {
    1.0
}
fn default_min_history_months() -> usize {
    12
}
fn default_history_window_months() -> usize {
    120
}
fn default_national_drift() -> f64 {
    0.04
}
fn default_national_volatility() -> f64 {
    0.10
}
fn default_fallback_confidence_factor() -> f64 {
    0.85
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            individual_vol_multiplier: default_individual_vol_multiplier(),
            deviation_vol_factor: default_deviation_vol_factor(),
            max_price_deviation: default_max_price_deviation(),
            min_history_months: default_min_history_months(),
            history_window_months: default_history_window_months(),
            national_drift: default_national_drift(),
            national_volatility: default_national_volatility(),
            fallback_confidence_factor: default_fallback_confidence_factor(),
        }
    }
}

/// Confidence score configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Base penalty per unit of annualized dispersion
    #[serde(default = "default_dispersion_weight")]
    pub dispersion_weight: f64,
}

fn default_dispersion_weight() -> f64 {
    4.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            dispersion_weight: default_dispersion_weight(),
        }
    }
}

/// Fragility bucket thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FragilityConfig {
    /// Downside probability at which Moderate starts
    #[serde(default = "default_moderate_downside")]
    pub moderate_downside: f64,

    /// Downside probability at which High starts
    #[serde(default = "default_high_downside")]
    pub high_downside: f64,

    /// Downside probability at which Very High starts
    #[serde(default = "default_very_high_downside")]
    pub very_high_downside: f64,

    /// Dispersion above this bumps the bucket one level
    #[serde(default = "default_dispersion_bump")]
    pub dispersion_bump: f64,
}

fn default_moderate_downside() -> f64 {
    0.10
}
fn default_high_downside() -> f64 {
    0.25
}
fn default_very_high_downside() -> f64 {
    0.45
}
fn default_dispersion_bump() -> f64 {
    0.15
}

impl Default for FragilityConfig {
    fn default() -> Self {
        Self {
            moderate_downside: default_moderate_downside(),
            high_downside: default_high_downside(),
            very_high_downside: default_very_high_downside(),
            dispersion_bump: default_dispersion_bump(),
        }
    }
}

/// Fair value band configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FairValueConfig {
    /// Half-width in units of annual volatility
    #[serde(default = "default_band_z")]
    pub band_z: f64,

    /// Narrowest half-width as a fraction of value
    #[serde(default = "default_min_half_width")]
    pub min_half_width: f64,

    /// Widest half-width as a fraction of value
    #[serde(default = "default_max_half_width")]
    pub max_half_width: f64,
}

fn default_band_z() -> f64 {
    1.0
}
fn default_min_half_width() -> f64 {
    0.05
}
fn default_max_half_width() -> f64 {
    0.25
}

impl Default for FairValueConfig {
    fn default() -> Self {
        Self {
            band_z: default_band_z(),
            min_half_width: default_min_half_width(),
            max_half_width: default_max_half_width(),
        }
    }
}

/// Mortgage affordability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AffordabilityConfig {
    /// Annual mortgage rate
    #[serde(default = "default_mortgage_rate")]
    pub mortgage_rate: f64,

    /// Loan term
    #[serde(default = "default_term_years")]
    pub term_years: u32,

    /// DTI at or below which there is no stress
    #[serde(default = "default_safe_dti")]
    pub safe_dti: f64,

    /// DTI at or above which stress is maximal
    #[serde(default = "default_stressed_dti")]
    pub stressed_dti: f64,
}

fn default_mortgage_rate() -> f64 {
    0.065
}
fn default_term_years() -> u32 {
    30
}
fn default_safe_dti() -> f64 {
    0.28
}
fn default_stressed_dti() -> f64 {
    0.36
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            mortgage_rate: default_mortgage_rate(),
            term_years: default_term_years(),
            safe_dti: default_safe_dti(),
            stressed_dti: default_stressed_dti(),
        }
    }
}

/// Explanation text generator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplainConfig {
    #[serde(default)]
    pub provider: ExplainProvider,

    /// Chat-completions endpoint
    #[serde(default = "default_explain_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_explain_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_explain_timeout_secs")]
    pub timeout_secs: u64,
}

/// Which explanation generator to use
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExplainProvider {
    /// Deterministic offline text
    #[default]
    Template,
    /// OpenAI-compatible chat completions
    OpenAi,
}

fn default_explain_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_explain_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_explain_timeout_secs() -> u64 {
    20
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            provider: ExplainProvider::Template,
            endpoint: default_explain_endpoint(),
            model: default_explain_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_explain_timeout_secs(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter port; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
