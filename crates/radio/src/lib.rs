//! air-to-ground radio layer for AeroLink

pub mod aoi;
pub mod channel;
pub mod fading;
pub mod link;
pub mod noise;

pub use aoi::{mean_aoi, peak_aoi, AoiTracker};
pub use channel::{channel_coefficient, ChannelModel};
pub use fading::FadingGenerator;
pub use link::{upload_latency_at, LinkPerformanceModel};
pub use noise::{FixedNoise, NoiseSource, UniformNoise};

pub use aerolink_core::{ModelError, ModelResult};
