//! Physical constants shared by the channel, link and mobility models.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Model-wide constants.
///
/// Keys follow the camelCase names used by scenario files, e.g.
/// `excessivePathLossLOS` or `numberOfIoTs`. Missing keys fall back to
/// [`ModelConfig::default`], an urban environment with a typical
/// rotary-wing UAV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    /// Carrier frequency f_c in Hz.
    pub carrier_frequency: f64,
    /// c in m/s.
    pub speed_of_light: f64,
    /// Path-loss exponent n.
    pub path_loss_exponent: f64,
    /// Linear excess loss of the LOS regime, must be > 1.
    #[serde(rename = "excessivePathLossLOS")]
    pub excessive_path_loss_los: f64,
    /// Linear excess loss of the NLOS regime, must exceed the LOS one.
    #[serde(rename = "excessivePathLossNLOS")]
    pub excessive_path_loss_nlos: f64,
    pub large_scale_fading: f64,
    /// Environment parameter α of the LOS logistic.
    pub propagation_parameter: f64,
    /// Steepness β of the LOS logistic.
    pub los_constant: f64,
    /// P_0, blade profile power in hover (W).
    pub blade_profile_power: f64,
    /// P_i, induced power in hover (W).
    pub induced_power_hover: f64,
    /// v_0, mean rotor induced velocity in hover (m/s).
    pub mean_rotor_induced_velocity: f64,
    /// U_tip, rotor blade tip speed (m/s).
    pub rotor_tip_speed: f64,
    pub fuselage_drag_ratio: f64,
    pub rotor_solidity: f64,
    /// Air density in kg/m³.
    pub mean_air_density: f64,
    /// Rotor disc area in m².
    pub rotor_disc_area: f64,
    #[serde(rename = "numberOfIoTs")]
    pub number_of_iots: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            carrier_frequency: 2.0e9,
            speed_of_light: 3.0e8,
            path_loss_exponent: 2.0,
            excessive_path_loss_los: db_to_linear(1.0),
            excessive_path_loss_nlos: db_to_linear(20.0),
            large_scale_fading: 1.0,
            propagation_parameter: 9.61,
            los_constant: 0.16,
            blade_profile_power: 79.86,
            induced_power_hover: 88.63,
            mean_rotor_induced_velocity: 4.03,
            rotor_tip_speed: 120.0,
            fuselage_drag_ratio: 0.6,
            rotor_solidity: 0.05,
            mean_air_density: 1.225,
            rotor_disc_area: 0.503,
            number_of_iots: 10,
        }
    }
}

impl ModelConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let config: ModelConfig = serde_json::from_str(json)
            .map_err(|e| ModelError::Config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Config(format!("cannot read {}: {e}", path.display())))?;
        log::debug!("Loaded model config from {}", path.display());
        Self::from_json_str(&raw)
    }

    /// Check that every constant is a positive finite real and that the
    /// excess path losses are ordered `NLOS > LOS > 1`.
    pub fn validate(&self) -> ModelResult<()> {
        let positive = [
            ("carrierFrequency", self.carrier_frequency),
            ("speedOfLight", self.speed_of_light),
            ("pathLossExponent", self.path_loss_exponent),
            ("excessivePathLossLOS", self.excessive_path_loss_los),
            ("excessivePathLossNLOS", self.excessive_path_loss_nlos),
            ("largeScaleFading", self.large_scale_fading),
            ("propagationParameter", self.propagation_parameter),
            ("losConstant", self.los_constant),
            ("bladeProfilePower", self.blade_profile_power),
            ("inducedPowerHover", self.induced_power_hover),
            ("meanRotorInducedVelocity", self.mean_rotor_induced_velocity),
            ("rotorTipSpeed", self.rotor_tip_speed),
            ("fuselageDragRatio", self.fuselage_drag_ratio),
            ("rotorSolidity", self.rotor_solidity),
            ("meanAirDensity", self.mean_air_density),
            ("rotorDiscArea", self.rotor_disc_area),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::Config(format!(
                    "{name} must be a positive finite real, got {value}"
                )));
            }
        }
        if self.number_of_iots == 0 {
            return Err(ModelError::Config("numberOfIoTs must be at least 1".into()));
        }
        check_excess_loss_order(self.excessive_path_loss_los, self.excessive_path_loss_nlos)
    }
}

/// `NLOS > LOS > 1`
pub fn check_excess_loss_order(los: f64, nlos: f64) -> ModelResult<()> {
    if los > 1.0 && nlos > los {
        Ok(())
    } else {
        Err(ModelError::Config(format!(
            "excess path losses must satisfy NLOS > LOS > 1, got LOS={los}, NLOS={nlos}"
        )))
    }
}

/// Convert a loss or gain from dB to a linear factor.
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}
