//! TOML-based simulation configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Top-level simulation configuration parsed from TOML.
///
/// All fields have defaults matching the original slider defaults. Load
/// from TOML with [`SimulationConfig::from_toml_file`] or use
/// `SimulationConfig::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Battery and inverter parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Import/export tariff parameters.
    #[serde(default)]
    pub tariff: TariffConfig,
}

/// Battery and inverter parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh, must be > 0).
    pub capacity_kwh: f64,
    /// Maximum inverter power, charge and discharge (kW, must be > 0).
    pub max_power_kw: f64,
    /// Charge efficiency (0.0–1.0).
    pub charge_efficiency: f64,
    /// Discharge efficiency (0.0–1.0).
    pub discharge_efficiency: f64,
    /// Minimum state of charge (% of capacity, 0–50).
    pub soc_min_pct: f64,
    /// Maximum state of charge (% of capacity, 50–100).
    pub soc_max_pct: f64,
    /// Charge response time (seconds, >= 0).
    pub charge_reaction_s: f64,
    /// Discharge response time (seconds, >= 0).
    pub discharge_reaction_s: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 5.0,
            max_power_kw: 2.5,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            soc_min_pct: 10.0,
            soc_max_pct: 90.0,
            charge_reaction_s: 10.0,
            discharge_reaction_s: 10.0,
        }
    }
}

/// Import/export tariff parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Price paid per kWh imported from the grid.
    pub import_price_eur_per_kwh: f64,
    /// Price received per kWh exported to the grid.
    pub export_price_eur_per_kwh: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            import_price_eur_per_kwh: 0.30,
            export_price_eur_per_kwh: 0.07,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.battery.validate();

        let t = &self.tariff;
        if !t.import_price_eur_per_kwh.is_finite() {
            errors.push(ConfigError::new(
                "tariff.import_price_eur_per_kwh",
                "must be finite",
            ));
        }
        if !t.export_price_eur_per_kwh.is_finite() {
            errors.push(ConfigError::new(
                "tariff.export_price_eur_per_kwh",
                "must be finite",
            ));
        }

        errors
    }
}

impl BatteryConfig {
    /// Validates the battery parameters and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.capacity_kwh.is_finite() && self.capacity_kwh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        if !(self.max_power_kw.is_finite() && self.max_power_kw > 0.0) {
            errors.push(ConfigError::new("battery.max_power_kw", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.charge_efficiency) {
            errors.push(ConfigError::new(
                "battery.charge_efficiency",
                "must be in [0.0, 1.0]",
            ));
        }
        if !(0.0..=1.0).contains(&self.discharge_efficiency) {
            errors.push(ConfigError::new(
                "battery.discharge_efficiency",
                "must be in [0.0, 1.0]",
            ));
        }
        if !(0.0..=50.0).contains(&self.soc_min_pct) {
            errors.push(ConfigError::new("battery.soc_min_pct", "must be in [0, 50]"));
        }
        if !(50.0..=100.0).contains(&self.soc_max_pct) {
            errors.push(ConfigError::new(
                "battery.soc_max_pct",
                "must be in [50, 100]",
            ));
        }
        if self.soc_min_pct >= self.soc_max_pct {
            errors.push(ConfigError::new(
                "battery.soc_min_pct",
                "must be < battery.soc_max_pct",
            ));
        }
        if !(self.charge_reaction_s.is_finite() && self.charge_reaction_s >= 0.0) {
            errors.push(ConfigError::new("battery.charge_reaction_s", "must be >= 0"));
        }
        if !(self.discharge_reaction_s.is_finite() && self.discharge_reaction_s >= 0.0) {
            errors.push(ConfigError::new(
                "battery.discharge_reaction_s",
                "must be >= 0",
            ));
        }

        errors
    }
}
