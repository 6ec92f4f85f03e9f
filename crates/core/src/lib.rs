//! physical-layer model core for AeroLink air-to-ground links

use thiserror::Error;

pub mod config;
pub mod geometry;
pub mod mobility;
pub mod node;

pub use config::ModelConfig;
pub use geometry::{distance, elevation_angle, Point3D};
pub use mobility::MobilityEnergyModel;
pub use node::{
    HasPosition, IotNode, NodeKind, ReceiverParams, Receives, TransmitterParams, Transmits, Uav,
    UavStatus,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("degenerate geometry: {0}")]
    Domain(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("numerical failure: {0}")]
    Numerical(String),

    #[error("insufficient energy: segment needs {required:.3}, only {available:.3} left")]
    InsufficientEnergy { required: f64, available: f64 },

    #[error("cannot aggregate {0} over an empty collection")]
    EmptyInput(&'static str),
}

pub type ModelResult<T> = Result<T, ModelError>;
