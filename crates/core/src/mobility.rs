//! Rotary-wing UAV propulsion energy.
//!
//! Forward-flight power at speed `v` is the sum of
//!
//! ```text
//! blade profile   P_0 · (1 + 3v² / U_tip²)
//! induced         P_i · v_0 / v
//! parasite        ½ · d_0 · s · ρ · A · v³
//! ```
//!
//! and a segment of length `d` flown at `v` costs `(d / v) · P(v)`.
//! Hovering draws `P_0 + P_i`.

use log::debug;

use crate::config::ModelConfig;
use crate::geometry::{distance, Point3D};
use crate::node::{HasPosition, Uav, UavStatus};
use crate::{ModelError, ModelResult};

pub struct MobilityEnergyModel {
    config: ModelConfig,
}

impl MobilityEnergyModel {
    pub fn new(config: ModelConfig) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Propulsion power in forward flight at `velocity` (m/s).
    pub fn propulsion_power(&self, velocity: f64) -> ModelResult<f64> {
        check_velocity(velocity)?;
        let c = &self.config;
        if c.rotor_tip_speed <= 0.0 {
            return Err(ModelError::Config("rotor tip speed must be positive".into()));
        }

        let blade = c.blade_profile_power
            * (1.0 + 3.0 * velocity * velocity / (c.rotor_tip_speed * c.rotor_tip_speed));
        let induced = c.induced_power_hover * c.mean_rotor_induced_velocity / velocity;
        let parasite = 0.5
            * c.fuselage_drag_ratio
            * c.rotor_solidity
            * c.mean_air_density
            * c.rotor_disc_area
            * velocity.powi(3);

        finite_energy("propulsion power", blade + induced + parasite)
    }

    /// Power drawn while hovering in place.
    pub fn hover_power(&self) -> f64 {
        self.config.blade_profile_power + self.config.induced_power_hover
    }

    /// Energy to fly `distance` meters at constant `velocity`.
    pub fn energy_for_segment(&self, distance: f64, velocity: f64) -> ModelResult<f64> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(ModelError::Domain(format!(
                "segment length must be non-negative, got {distance}"
            )));
        }
        if distance == 0.0 {
            check_velocity(velocity)?;
            return Ok(0.0);
        }
        let power = self.propulsion_power(velocity)?;
        let flight_time = distance / velocity;
        finite_energy("segment energy", flight_time * power)
    }

    pub fn energy_for_hover(&self, duration: f64) -> ModelResult<f64> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(ModelError::Domain(format!(
                "hover duration must be non-negative, got {duration}"
            )));
        }
        finite_energy("hover energy", duration * self.hover_power())
    }

    /// Charge a flight segment to the UAV's budget.
    ///
    /// Returns the energy drawn. If the budget cannot cover the segment the
    /// UAV is left untouched and [`ModelError::InsufficientEnergy`] is returned.
    pub fn apply_travel(&self, uav: &mut Uav, distance: f64, velocity: f64) -> ModelResult<f64> {
        let required = self.energy_for_segment(distance, velocity)?;
        ensure_budget(uav, required)?;

        let status = if distance > 0.0 {
            UavStatus::Travelling
        } else {
            uav.status()
        };
        uav.commit_segment(required, distance / velocity, status);
        debug!(
            "UAV flew {:.1} m at {:.1} m/s using {:.3}, {:.3} left",
            distance,
            velocity,
            required,
            uav.energy()
        );
        Ok(required)
    }

    /// Fly the UAV in a straight line to `destination`.
    pub fn fly_to(&self, uav: &mut Uav, destination: Point3D, velocity: f64) -> ModelResult<f64> {
        let length = distance(uav.position(), &destination)?;
        let used = self.apply_travel(uav, length, velocity)?;
        uav.move_to(destination);
        Ok(used)
    }

    pub fn apply_hover(&self, uav: &mut Uav, duration: f64) -> ModelResult<f64> {
        let required = self.energy_for_hover(duration)?;
        ensure_budget(uav, required)?;
        // hovering is not a motion segment, keep the last flight time
        let flight_time = uav.flight_time();
        uav.commit_segment(required, flight_time, UavStatus::Hovering);
        debug!("UAV hovered {:.1} s using {:.3}, {:.3} left", duration, required, uav.energy());
        Ok(required)
    }
}

fn check_velocity(velocity: f64) -> ModelResult<()> {
    if !velocity.is_finite() || velocity <= 0.0 {
        return Err(ModelError::Domain(format!(
            "flight velocity must be positive, got {velocity}"
        )));
    }
    Ok(())
}

fn finite_energy(what: &str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::Numerical(format!("{what} is not finite ({value})")))
    }
}

fn ensure_budget(uav: &Uav, required: f64) -> ModelResult<()> {
    if !required.is_finite() || required < 0.0 {
        return Err(ModelError::Numerical(format!("cannot charge {required} to the budget")));
    }
    if uav.energy() - required < 0.0 {
        return Err(ModelError::InsufficientEnergy {
            required,
            available: uav.energy(),
        });
    }
    Ok(())
}
