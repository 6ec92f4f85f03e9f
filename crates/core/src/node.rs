//! Radio nodes: UAV relays and ground IoT sensors.
//!
//! Capabilities are split into traits so a link is always typed as a
//! `(Transmits, Receives)` pair: a [`Uav`] does both, an [`IotNode`] only
//! transmits.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::geometry::Point3D;
use crate::{ModelError, ModelResult};

/// Which propagation regime applies when the node transmits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Airborne transmitter, treated as always in line of sight.
    Uav,
    /// Ground transmitter, LOS probability follows the elevation angle.
    Iot,
}

pub trait HasPosition {
    fn position(&self) -> &Point3D;
}

pub trait Transmits: HasPosition {
    fn transmitter(&self) -> &TransmitterParams;
    fn kind(&self) -> NodeKind;
}

pub trait Receives: HasPosition {
    fn receiver(&self) -> &ReceiverParams;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransmitterParams {
    /// Hz
    pub bandwidth: f64,
    /// W
    pub transmission_power: f64,
    /// Bits waiting to be uploaded.
    pub amount_of_data: f64,
    pub small_scale_fading: Complex64,
}

impl Default for TransmitterParams {
    fn default() -> Self {
        Self {
            bandwidth: 1.0,
            transmission_power: 1.0,
            amount_of_data: 1.0,
            small_scale_fading: Complex64::new(1.0, 0.0),
        }
    }
}

impl TransmitterParams {
    pub fn validate(&self) -> ModelResult<()> {
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(ModelError::Config(format!(
                "bandwidth must be positive, got {}",
                self.bandwidth
            )));
        }
        if !self.transmission_power.is_finite() || self.transmission_power <= 0.0 {
            return Err(ModelError::Config(format!(
                "transmission power must be positive, got {}",
                self.transmission_power
            )));
        }
        if !self.amount_of_data.is_finite() || self.amount_of_data < 0.0 {
            return Err(ModelError::Config(format!(
                "amount of data must be non-negative, got {}",
                self.amount_of_data
            )));
        }
        if !self.small_scale_fading.is_finite() {
            return Err(ModelError::Config("small-scale fading must be finite".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverParams {
    /// Noise power used directly in the SNR denominator.
    pub noise_power: f64,
}

impl Default for ReceiverParams {
    fn default() -> Self {
        Self { noise_power: 1.0 }
    }
}

impl ReceiverParams {
    pub fn validate(&self) -> ModelResult<()> {
        if !self.noise_power.is_finite() || self.noise_power <= 0.0 {
            return Err(ModelError::Config(format!(
                "noise power must be positive, got {}",
                self.noise_power
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UavStatus {
    #[default]
    Hovering,
    Travelling,
}

/// Aerial relay. Receives IoT uploads and carries a finite energy budget.
#[derive(Debug, Clone)]
pub struct Uav {
    position: Point3D,
    transmitter: TransmitterParams,
    receiver: ReceiverParams,
    status: UavStatus,
    energy: f64,
    flight_time: f64,
}

impl Uav {
    pub fn new(
        position: Point3D,
        transmitter: TransmitterParams,
        receiver: ReceiverParams,
        initial_energy: f64,
    ) -> ModelResult<Self> {
        if !position.is_finite() {
            return Err(ModelError::Domain(format!("UAV placed at {position:?}")));
        }
        transmitter.validate()?;
        receiver.validate()?;
        if !initial_energy.is_finite() || initial_energy < 0.0 {
            return Err(ModelError::Config(format!(
                "initial energy must be non-negative, got {initial_energy}"
            )));
        }
        Ok(Self {
            position,
            transmitter,
            receiver,
            status: UavStatus::Hovering,
            energy: initial_energy,
            flight_time: 0.0,
        })
    }

    pub fn status(&self) -> UavStatus {
        self.status
    }

    /// Remaining onboard energy.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Duration of the most recent motion segment; zero until the UAV has moved.
    pub fn flight_time(&self) -> f64 {
        self.flight_time
    }

    /// Callers must have checked that `amount` fits in the budget.
    pub(crate) fn commit_segment(&mut self, amount: f64, flight_time: f64, status: UavStatus) {
        self.energy -= amount;
        self.flight_time = flight_time;
        self.status = status;
    }

    pub(crate) fn move_to(&mut self, destination: Point3D) {
        self.position = destination;
    }
}

impl HasPosition for Uav {
    fn position(&self) -> &Point3D {
        &self.position
    }
}

impl Transmits for Uav {
    fn transmitter(&self) -> &TransmitterParams {
        &self.transmitter
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Uav
    }
}

impl Receives for Uav {
    fn receiver(&self) -> &ReceiverParams {
        &self.receiver
    }
}

/// Stationary ground sensor.
#[derive(Debug, Clone)]
pub struct IotNode {
    position: Point3D,
    transmitter: TransmitterParams,
    aoi: f64,
}

impl IotNode {
    pub fn new(position: Point3D, transmitter: TransmitterParams) -> ModelResult<Self> {
        if !position.is_finite() {
            return Err(ModelError::Domain(format!("IoT node placed at {position:?}")));
        }
        transmitter.validate()?;
        Ok(Self {
            position,
            transmitter,
            aoi: 0.0,
        })
    }

    /// Age of the last delivered sample.
    pub fn aoi(&self) -> f64 {
        self.aoi
    }

    pub fn set_aoi(&mut self, aoi: f64) -> ModelResult<()> {
        if !aoi.is_finite() || aoi < 0.0 {
            return Err(ModelError::Numerical(format!("age of information {aoi} is not valid")));
        }
        self.aoi = aoi;
        Ok(())
    }
}

impl HasPosition for IotNode {
    fn position(&self) -> &Point3D {
        &self.position
    }
}

impl Transmits for IotNode {
    fn transmitter(&self) -> &TransmitterParams {
        &self.transmitter
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Iot
    }
}
