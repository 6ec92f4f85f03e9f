//! Shannon-capacity link metrics: spectral efficiency, rate, latency, energy.

use aerolink_core::{ModelConfig, ModelError, ModelResult, Receives, Transmits};
use log::trace;

use crate::channel::ChannelModel;
use crate::noise::NoiseSource;

/// `log2(1 + snr)`, refusing anything that is not a finite non-negative SNR.
fn shannon(snr: f64) -> ModelResult<f64> {
    let arg = 1.0 + snr;
    if !arg.is_finite() || arg < 1.0 {
        return Err(ModelError::Numerical(format!("log2 argument {arg} out of range")));
    }
    Ok(arg.log2())
}

/// Time to push `amount_of_data` bits at `data_rate` bits/s.
pub fn upload_latency_at(amount_of_data: f64, data_rate: f64) -> ModelResult<f64> {
    if !data_rate.is_finite() || data_rate <= 0.0 {
        return Err(ModelError::Numerical(format!(
            "upload latency undefined for data rate {data_rate}"
        )));
    }
    Ok(amount_of_data / data_rate)
}

pub struct LinkPerformanceModel {
    channel: ChannelModel,
}

impl LinkPerformanceModel {
    pub fn new(config: ModelConfig) -> ModelResult<Self> {
        Ok(Self {
            channel: ChannelModel::new(config)?,
        })
    }

    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    /// Received signal power over unit noise, `P · |h|²`.
    fn signal_power<T: Transmits + ?Sized>(&self, tx: &T) -> f64 {
        let params = tx.transmitter();
        let h = self.channel.channel_coefficient(params.small_scale_fading);
        params.transmission_power * h.norm_sqr()
    }

    /// Spectral efficiency in bits/s/Hz for a known noise amplitude:
    /// `log2(1 + P · |h|² / noise²)`.
    pub fn spectral_efficiency_with_noise<T>(&self, tx: &T, noise: f64) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
    {
        if !noise.is_finite() || noise == 0.0 {
            return Err(ModelError::Numerical(format!(
                "noise sample {noise} gives an undefined SNR"
            )));
        }
        shannon(self.signal_power(tx) / (noise * noise))
    }

    pub fn spectral_efficiency<T, N>(&self, tx: &T, noise: &mut N) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        N: NoiseSource + ?Sized,
    {
        self.spectral_efficiency_with_noise(tx, noise.sample())
    }

    /// bits/s
    pub fn data_rate<T, N>(&self, tx: &T, noise: &mut N) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        N: NoiseSource + ?Sized,
    {
        Ok(tx.transmitter().bandwidth * self.spectral_efficiency(tx, noise)?)
    }

    /// Seconds to upload the transmitter's pending data.
    pub fn upload_latency<T, N>(&self, tx: &T, noise: &mut N) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        N: NoiseSource + ?Sized,
    {
        let rate = self.data_rate(tx, noise)?;
        let latency = upload_latency_at(tx.transmitter().amount_of_data, rate)?;
        trace!("upload at {:.3} bit/s takes {:.6} s", rate, latency);
        Ok(latency)
    }

    /// Transmit energy for the pending data over the link to `rx`:
    /// `D / (G · log2(1 + P · |h|² / N_rx))`, with `G` the LOS/NLOS mixed gain.
    pub fn energy_consumption<T, R>(&self, tx: &T, rx: &R) -> ModelResult<f64>
    where
        T: Transmits + ?Sized,
        R: Receives + ?Sized,
    {
        let gain = self.channel.channel_gain(tx, rx)?;
        let noise_power = rx.receiver().noise_power;
        if !noise_power.is_finite() || noise_power <= 0.0 {
            return Err(ModelError::Numerical(format!(
                "receiver noise power {noise_power} gives an undefined SNR"
            )));
        }
        let efficiency = shannon(self.signal_power(tx) / noise_power)?;
        let denominator = gain * efficiency;
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(ModelError::Numerical(format!(
                "energy consumption denominator is {denominator}"
            )));
        }
        Ok(tx.transmitter().amount_of_data / denominator)
    }
}
