//! Probabilistic LOS/NLOS air-to-ground channel.

use std::f64::consts::PI;

use aerolink_core::config::check_excess_loss_order;
use aerolink_core::{
    distance, elevation_angle, ModelConfig, ModelError, ModelResult, NodeKind, Receives, Transmits,
};
use log::trace;
use num_complex::Complex64;

/// `sqrt(large_scale_fading) · small_scale_fading`
pub fn channel_coefficient(small_scale_fading: Complex64, large_scale_fading: f64) -> Complex64 {
    small_scale_fading * large_scale_fading.sqrt()
}

pub struct ChannelModel {
    config: ModelConfig,
}

impl ChannelModel {
    pub fn new(config: ModelConfig) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Logistic LOS probability for an elevation angle in radians:
    /// `1 / (1 + α · exp(-β · (θ - α)))`.
    pub fn los_probability(&self, elevation_rad: f64) -> f64 {
        let alpha = self.config.propagation_parameter;
        let beta = self.config.los_constant;
        1.0 / (1.0 + alpha * (-beta * (elevation_rad - alpha)).exp())
    }

    /// LOS probability of a concrete link. Airborne transmitters are always
    /// in line of sight; ground transmitters use the elevation angle towards
    /// the receiver.
    pub fn link_los_probability<T, R>(&self, tx: &T, rx: &R) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        R: Receives + ?Sized,
    {
        match tx.kind() {
            NodeKind::Uav => Ok(1.0),
            NodeKind::Iot => {
                let theta = elevation_angle(tx.position(), rx.position())?;
                Ok(self.los_probability(theta))
            }
        }
    }

    pub fn channel_coefficient(&self, small_scale_fading: Complex64) -> Complex64 {
        channel_coefficient(small_scale_fading, self.config.large_scale_fading)
    }

    /// Distance-dependent factor `(4π · f_c · d / c)^(-n)`.
    pub fn path_loss_factor(&self, distance: f64) -> ModelResult<f64> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ModelError::Domain(format!(
                "path loss needs a positive distance, got {distance}"
            )));
        }
        let c = &self.config;
        let free_space = 4.0 * PI * c.carrier_frequency * distance / c.speed_of_light;
        let factor = free_space.powf(-c.path_loss_exponent);
        positive_gain("path loss factor", factor, distance)
    }

    /// Gain at `distance` when the LOS probability is already known.
    pub fn gain_for(&self, p_los: f64, distance: f64) -> ModelResult<f64> {
        let c = &self.config;
        check_excess_loss_order(c.excessive_path_loss_los, c.excessive_path_loss_nlos)?;
        if !(0.0..=1.0).contains(&p_los) {
            return Err(ModelError::Numerical(format!(
                "LOS probability {p_los} outside [0, 1]"
            )));
        }
        let mixture =
            p_los / c.excessive_path_loss_los + (1.0 - p_los) / c.excessive_path_loss_nlos;
        positive_gain("channel gain", mixture * self.path_loss_factor(distance)?, distance)
    }

    /// Average channel gain of the link, mixing both regimes by LOS probability.
    pub fn channel_gain<T, R>(&self, tx: &T, rx: &R) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        R: Receives + ?Sized,
    {
        let d = distance(tx.position(), rx.position())?;
        if d == 0.0 {
            return Err(ModelError::Domain("transmitter and receiver coincide".into()));
        }
        let p = self.link_los_probability(tx, rx)?;
        let gain = self.gain_for(p, d)?;
        trace!("channel gain over {:.1} m with P_los={:.4}: {:e}", d, p, gain);
        Ok(gain)
    }
}

/// A gain of 0 or infinity means the `f64` range was exceeded.
fn positive_gain(what: &str, value: f64, distance: f64) -> ModelResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::Numerical(format!(
            "{what} at {distance} m is out of range ({value})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerolink_core::{HasPosition, IotNode, Point3D, ReceiverParams, TransmitterParams, Uav};

    fn scenario_config() -> ModelConfig {
        ModelConfig {
            carrier_frequency: 2.4e9,
            speed_of_light: 3e8,
            path_loss_exponent: 2.0,
            excessive_path_loss_los: 1.2,
            excessive_path_loss_nlos: 3.0,
            ..Default::default()
        }
    }

    fn uav_at(p: Point3D) -> Uav {
        Uav::new(p, TransmitterParams::default(), ReceiverParams::default(), 100.0).unwrap()
    }

    fn iot_at(p: Point3D) -> IotNode {
        IotNode::new(p, TransmitterParams::default()).unwrap()
    }

    #[test]
    fn los_probability_at_alpha() {
        let model = ChannelModel::new(ModelConfig::default()).unwrap();
        let alpha = model.config().propagation_parameter;
        assert!((model.los_probability(alpha) - 1.0 / (1.0 + alpha)).abs() < 1e-12);
    }

    #[test]
    fn los_probability_is_increasing_and_bounded() {
        let model = ChannelModel::new(ModelConfig {
            propagation_parameter: 0.5,
            los_constant: 4.0,
            ..Default::default()
        })
        .unwrap();
        let mut last = 0.0;
        for i in 0..=20 {
            let theta = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 20.0;
            let p = model.los_probability(theta);
            assert!(p > 0.0 && p < 1.0);
            assert!(p > last);
            last = p;
        }
    }

    #[test]
    fn uav_transmitter_is_always_los() {
        let model = ChannelModel::new(ModelConfig::default()).unwrap();
        let uav = uav_at(Point3D::new(0.0, 0.0, 100.0));
        let relay = uav_at(Point3D::new(50.0, 0.0, 20.0));
        assert_eq!(model.link_los_probability(&uav, &relay).unwrap(), 1.0);
    }

    #[test]
    fn iot_probability_uses_elevation_towards_receiver() {
        let model = ChannelModel::new(ModelConfig::default()).unwrap();
        let iot = iot_at(Point3D::new(0.0, 0.0, 0.0));
        let uav = uav_at(Point3D::new(100.0, 0.0, 100.0));
        let expected = model.los_probability(std::f64::consts::FRAC_PI_4);
        assert!((model.link_los_probability(&iot, &uav).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn reference_gain_at_500_meters() {
        let model = ChannelModel::new(scenario_config()).unwrap();
        let expected = (0.8 / 1.2 + 0.2 / 3.0)
            * ((4.0 * PI * 2.4e9 * 500.0) / 3e8_f64).powf(-2.0);
        let gain = model.gain_for(0.8, 500.0).unwrap();
        assert!(((gain - expected) / expected).abs() < 1e-9);
    }

    #[test]
    fn gain_decreases_with_distance() {
        let model = ChannelModel::new(scenario_config()).unwrap();
        let uav = uav_at(Point3D::new(0.0, 0.0, 100.0));
        let mut last = f64::INFINITY;
        for x in [0.0, 50.0, 200.0, 800.0, 3_000.0] {
            let iot = iot_at(Point3D::new(x, 0.0, 0.0));
            let g = model.channel_gain(&iot, &uav).unwrap();
            assert!(g > 0.0 && g < last);
            last = g;
        }
    }

    #[test]
    fn gain_lies_between_pure_regimes() {
        let model = ChannelModel::new(scenario_config()).unwrap();
        let iot = iot_at(Point3D::new(120.0, -40.0, 0.0));
        let uav = uav_at(Point3D::new(0.0, 0.0, 80.0));
        let d = distance(iot.position(), uav.position()).unwrap();
        let g = model.channel_gain(&iot, &uav).unwrap();
        let los = model.gain_for(1.0, d).unwrap();
        let nlos = model.gain_for(0.0, d).unwrap();
        assert!(nlos < g && g < los);
    }

    #[test]
    fn underflowing_gain_is_a_numerical_error() {
        let model = ChannelModel::new(scenario_config()).unwrap();
        assert!(matches!(model.path_loss_factor(1e160), Err(ModelError::Numerical(_))));
        assert!(matches!(model.gain_for(0.5, 1e160), Err(ModelError::Numerical(_))));
        assert!(model.gain_for(0.5, 1e6).unwrap() > 0.0);
    }

    #[test]
    fn coincident_nodes_are_rejected() {
        let model = ChannelModel::new(ModelConfig::default()).unwrap();
        let here = Point3D::new(1.0, 2.0, 3.0);
        let err = model.channel_gain(&iot_at(here), &uav_at(here)).unwrap_err();
        assert!(matches!(err, ModelError::Domain(_)));
    }

    #[test]
    fn misordered_losses_fail_at_construction() {
        let bad = ModelConfig {
            excessive_path_loss_los: 3.0,
            excessive_path_loss_nlos: 2.0,
            ..Default::default()
        };
        assert!(matches!(ChannelModel::new(bad), Err(ModelError::Config(_))));
    }

    #[test]
    fn coefficient_scales_fading() {
        let h = channel_coefficient(Complex64::new(0.6, 0.8), 4.0);
        assert!((h - Complex64::new(1.2, 1.6)).norm() < 1e-12);
        assert!((h.norm_sqr() - 4.0).abs() < 1e-12);
    }
}
