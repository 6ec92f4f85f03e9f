//! Monte-Carlo scenarios: one UAV relay collecting data from a field of IoT sensors

use std::f64::consts::TAU;
use std::sync::Arc;

use aerolink_core::{
    IotNode, MobilityEnergyModel, ModelConfig, ModelError, ModelResult, Point3D, ReceiverParams,
    TransmitterParams, Uav,
};
use aerolink_radio::{mean_aoi, peak_aoi, AoiTracker, FadingGenerator, UniformNoise};
use anyhow::Result;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub config: ModelConfig,
    /// Cruise altitude of the relay (m).
    pub uav_altitude: f64,
    /// The relay starts this far west of the field center (m).
    pub start_offset: f64,
    /// m/s
    pub cruise_velocity: f64,
    pub initial_energy: f64,
    /// IoT nodes are spread uniformly over a disc of this radius (m).
    pub area_radius: f64,
    /// Bits each IoT node uploads.
    pub data_bits: f64,
    /// Hz
    pub bandwidth: f64,
    /// W
    pub iot_power: f64,
    pub uav_noise_power: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            config: ModelConfig::default(),
            uav_altitude: 100.0,
            start_offset: 500.0,
            cruise_velocity: 15.0,
            initial_energy: 1.0e5,
            area_radius: 300.0,
            data_bits: 1.0e5,
            bandwidth: 1.0e6,
            iot_power: 1.0,
            uav_noise_power: 1.0e-3,
        }
    }
}

impl ScenarioParams {
    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.config.validate()?;
        let positive = [
            ("uav altitude", self.uav_altitude),
            ("cruise velocity", self.cruise_velocity),
            ("area radius", self.area_radius),
            ("bandwidth", self.bandwidth),
            ("iot power", self.iot_power),
            ("uav noise power", self.uav_noise_power),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("start offset", self.start_offset),
            ("initial energy", self.initial_energy),
            ("data bits", self.data_bits),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Place `numberOfIoTs` ground sensors with fresh fading samples.
pub fn build_population<R: Rng>(params: &ScenarioParams, rng: &mut R) -> ModelResult<Vec<IotNode>> {
    let count = params.config.number_of_iots;
    let fading = FadingGenerator::new(&mut *rng).samples(count);

    fading
        .into_iter()
        .map(|small_scale_fading| {
            // sqrt keeps the density uniform over the disc
            let r = params.area_radius * rng.random::<f64>().sqrt();
            let phi = rng.random_range(0.0..TAU);
            IotNode::new(
                Point3D::new(r * phi.cos(), r * phi.sin(), 0.0),
                TransmitterParams {
                    bandwidth: params.bandwidth,
                    transmission_power: params.iot_power,
                    amount_of_data: params.data_bits,
                    small_scale_fading,
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialMetrics {
    pub mean_aoi: f64,
    pub peak_aoi: f64,
    pub mean_channel_gain: f64,
    pub mean_iot_energy: f64,
    pub uav_energy_used: f64,
    pub residual_energy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    Completed(TrialMetrics),
    /// The relay ran out of energy; nothing was delivered.
    Aborted { required: f64, available: f64 },
}

/// Fly the relay to the field center, collect every upload, then hover for
/// the time the uploads took.
pub fn run_trial(params: &ScenarioParams, seed: u64) -> ModelResult<TrialOutcome> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut iots = build_population(params, &mut rng)?;
    let mut noise = UniformNoise::new(StdRng::from_rng(&mut rng));

    let mobility = MobilityEnergyModel::new(params.config.clone())?;
    let tracker = AoiTracker::new(params.config.clone())?;

    let mut uav = Uav::new(
        Point3D::new(-params.start_offset, 0.0, params.uav_altitude),
        TransmitterParams::default(),
        ReceiverParams {
            noise_power: params.uav_noise_power,
        },
        params.initial_energy,
    )?;

    let center = Point3D::new(0.0, 0.0, params.uav_altitude);
    let mut used = match mobility.fly_to(&mut uav, center, params.cruise_velocity) {
        Ok(used) => used,
        Err(ModelError::InsufficientEnergy { required, available }) => {
            warn!("trial {seed}: relay cannot reach the field ({required:.1} > {available:.1})");
            return Ok(TrialOutcome::Aborted { required, available });
        }
        Err(e) => return Err(e),
    };

    let link = tracker.link();
    let mut gain_sum = 0.0;
    let mut energy_sum = 0.0;
    let mut upload_time = 0.0;
    for iot in iots.iter_mut() {
        let aoi = tracker.record_upload(iot, &uav, &mut noise)?;
        upload_time += aoi - uav.flight_time();
        gain_sum += link.channel().channel_gain(&*iot, &uav)?;
        energy_sum += link.energy_consumption(&*iot, &uav)?;
    }

    match mobility.apply_hover(&mut uav, upload_time) {
        Ok(hover) => used += hover,
        Err(ModelError::InsufficientEnergy { required, available }) => {
            warn!("trial {seed}: relay cannot hover through the uploads");
            return Ok(TrialOutcome::Aborted { required, available });
        }
        Err(e) => return Err(e),
    }

    let n = iots.len() as f64;
    let metrics = TrialMetrics {
        mean_aoi: mean_aoi(&iots)?,
        peak_aoi: peak_aoi(&iots)?,
        mean_channel_gain: gain_sum / n,
        mean_iot_energy: energy_sum / n,
        uav_energy_used: used,
        residual_energy: uav.energy(),
    };
    debug!("trial {seed}: {metrics:?}");
    Ok(TrialOutcome::Completed(metrics))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub trials: usize,
    pub completed: usize,
    pub aborted: usize,
    /// Averages over completed trials, except `peak_aoi` which is the worst seen.
    pub averages: Option<TrialMetrics>,
}

impl SimulationReport {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        let completed: Vec<&TrialMetrics> = outcomes
            .iter()
            .filter_map(|o| match o {
                TrialOutcome::Completed(m) => Some(m),
                TrialOutcome::Aborted { .. } => None,
            })
            .collect();

        let averages = if completed.is_empty() {
            None
        } else {
            let n = completed.len() as f64;
            let mut avg = TrialMetrics::default();
            for m in &completed {
                avg.mean_aoi += m.mean_aoi / n;
                avg.peak_aoi = avg.peak_aoi.max(m.peak_aoi);
                avg.mean_channel_gain += m.mean_channel_gain / n;
                avg.mean_iot_energy += m.mean_iot_energy / n;
                avg.uav_energy_used += m.uav_energy_used / n;
                avg.residual_energy += m.residual_energy / n;
            }
            Some(avg)
        };

        Self {
            trials: outcomes.len(),
            completed: completed.len(),
            aborted: outcomes.len() - completed.len(),
            averages,
        }
    }
}

/// Run `trials` independent trials on the blocking pool. Trial `i` is seeded
/// with `seed + i`, so a report is reproducible from its seed.
pub async fn run_monte_carlo(
    params: ScenarioParams,
    trials: usize,
    seed: u64,
    progress: Option<ProgressBar>,
) -> Result<SimulationReport> {
    if trials == 0 {
        return Err(ModelError::EmptyInput("Monte-Carlo trials").into());
    }
    params.validate()?;
    info!(
        "Running {} trials with {} IoT nodes (seed {})",
        trials, params.config.number_of_iots, seed
    );

    let params = Arc::new(params);
    let mut handles = Vec::with_capacity(trials);
    for trial in 0..trials {
        let params = params.clone();
        let progress = progress.clone();
        let trial_seed = seed.wrapping_add(trial as u64);
        handles.push(tokio::task::spawn_blocking(move || {
            let outcome = run_trial(&params, trial_seed);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            outcome
        }));
    }

    let mut outcomes = Vec::with_capacity(trials);
    for handle in handles {
        outcomes.push(handle.await??);
    }

    let report = SimulationReport::from_outcomes(&outcomes);
    info!(
        "Monte-Carlo complete: {} completed, {} aborted",
        report.completed, report.aborted
    );
    Ok(report)
}
