//! simulation tools for AeroLink

pub mod scenarios;

use aerolink_core::config::db_to_linear;
use aerolink_core::ModelConfig;

/// Propagation environments with the usual air-to-ground LOS fit
/// (α, β) and excess losses (η_LOS, η_NLOS in dB).
pub struct EnvironmentPresets;

impl EnvironmentPresets {
    pub fn suburban() -> ModelConfig {
        environment(4.88, 0.43, 0.1, 21.0)
    }

    pub fn urban() -> ModelConfig {
        environment(9.61, 0.16, 1.0, 20.0)
    }

    pub fn dense_urban() -> ModelConfig {
        environment(12.08, 0.11, 1.6, 23.0)
    }

    pub fn high_rise_urban() -> ModelConfig {
        environment(27.23, 0.08, 2.3, 34.0)
    }

    pub fn all() -> Vec<(&'static str, ModelConfig)> {
        vec![
            ("Suburban", Self::suburban()),
            ("Urban", Self::urban()),
            ("Dense Urban", Self::dense_urban()),
            ("High-rise Urban", Self::high_rise_urban()),
        ]
    }
}

fn environment(alpha: f64, beta: f64, eta_los_db: f64, eta_nlos_db: f64) -> ModelConfig {
    ModelConfig {
        propagation_parameter: alpha,
        los_constant: beta,
        excessive_path_loss_los: db_to_linear(eta_los_db),
        excessive_path_loss_nlos: db_to_linear(eta_nlos_db),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_configs() {
        for (name, config) in EnvironmentPresets::all() {
            assert!(config.validate().is_ok(), "{name} preset is invalid");
        }
    }

    #[test]
    fn denser_environments_lose_more_without_los() {
        let nlos: Vec<f64> = EnvironmentPresets::all()
            .iter()
            .map(|(_, c)| c.excessive_path_loss_nlos)
            .collect();
        assert!(nlos[3] > nlos[2] && nlos[2] > nlos[1]);
    }
}
