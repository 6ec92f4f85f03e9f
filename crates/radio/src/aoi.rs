//! Age of information of IoT samples relayed through a UAV.

use aerolink_core::{IotNode, ModelConfig, ModelError, ModelResult, Uav};
use log::debug;

use crate::link::LinkPerformanceModel;
use crate::noise::NoiseSource;

pub struct AoiTracker {
    link: LinkPerformanceModel,
}

impl AoiTracker {
    pub fn new(config: ModelConfig) -> ModelResult<Self> {
        Ok(Self {
            link: LinkPerformanceModel::new(config)?,
        })
    }

    pub fn link(&self) -> &LinkPerformanceModel {
        &self.link
    }

    /// Deliver the node's pending data to `uav`. The new age is the UAV's
    /// last flight time plus the upload latency of the IoT→UAV link.
    pub fn record_upload<N>(&self, iot: &mut IotNode, uav: &Uav, noise: &mut N) -> ModelResult<f64>
    where
        N: NoiseSource + ?Sized,
    {
        let latency = self.link.upload_latency(&*iot, noise)?;
        let aoi = uav.flight_time() + latency;
        iot.set_aoi(aoi)?;
        debug!("IoT upload delivered, AoI {:.6}", aoi);
        Ok(aoi)
    }
}

pub fn mean_aoi(iots: &[IotNode]) -> ModelResult<f64> {
    if iots.is_empty() {
        return Err(ModelError::EmptyInput("mean AoI"));
    }
    Ok(iots.iter().map(IotNode::aoi).sum::<f64>() / iots.len() as f64)
}

pub fn peak_aoi(iots: &[IotNode]) -> ModelResult<f64> {
    iots.iter()
        .map(IotNode::aoi)
        .reduce(f64::max)
        .ok_or(ModelError::EmptyInput("peak AoI"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;
    use aerolink_core::{MobilityEnergyModel, Point3D, ReceiverParams, TransmitterParams};
    use num_complex::Complex64;

    fn iot_with_aoi(aoi: f64) -> IotNode {
        let mut node = IotNode::new(Point3D::default(), TransmitterParams::default()).unwrap();
        node.set_aoi(aoi).unwrap();
        node
    }

    fn relay() -> Uav {
        Uav::new(
            Point3D::new(0.0, 0.0, 100.0),
            TransmitterParams::default(),
            ReceiverParams::default(),
            1e6,
        )
        .unwrap()
    }

    #[test]
    fn mean_of_two() {
        let nodes = [iot_with_aoi(2.0), iot_with_aoi(4.0)];
        assert_eq!(mean_aoi(&nodes).unwrap(), 3.0);
        assert_eq!(peak_aoi(&nodes).unwrap(), 4.0);
    }

    #[test]
    fn empty_population_is_rejected() {
        assert_eq!(mean_aoi(&[]), Err(ModelError::EmptyInput("mean AoI")));
        assert!(matches!(peak_aoi(&[]), Err(ModelError::EmptyInput(_))));
    }

    #[test]
    fn upload_adds_flight_time_and_latency() {
        let tracker = AoiTracker::new(ModelConfig::default()).unwrap();
        let mobility = MobilityEnergyModel::new(ModelConfig::default()).unwrap();
        let mut uav = relay();
        mobility.apply_travel(&mut uav, 100.0, 20.0).unwrap();

        // rate = 2 · log2(1 + 3) = 4, latency = 8 / 4
        let mut node = IotNode::new(
            Point3D::new(10.0, 0.0, 0.0),
            TransmitterParams {
                bandwidth: 2.0,
                transmission_power: 3.0,
                amount_of_data: 8.0,
                small_scale_fading: Complex64::new(1.0, 0.0),
            },
        )
        .unwrap();
        let aoi = tracker.record_upload(&mut node, &uav, &mut FixedNoise(1.0)).unwrap();
        assert!((aoi - 7.0).abs() < 1e-12);
        assert_eq!(node.aoi(), aoi);
    }

    #[test]
    fn failed_upload_keeps_previous_age() {
        let tracker = AoiTracker::new(ModelConfig::default()).unwrap();
        let mut node = iot_with_aoi(1.5);
        let err = tracker.record_upload(&mut node, &relay(), &mut FixedNoise(0.0));
        assert!(matches!(err, Err(ModelError::Numerical(_))));
        assert_eq!(node.aoi(), 1.5);
    }
}
