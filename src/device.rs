//! CPAL device discovery and output streams.
//!
//! [`CpalDevice`] finds an output device; [`CpalDevice::open`] hands a
//! [`Renderer`] to the device's callback thread and starts playback.
//!
//! # Example
//!
//! ```no_run
//! use wavevox::{CpalDevice, Engine, EngineConfig};
//!
//! let device = CpalDevice::default_output()?;
//! println!("{} ({} Hz, {} ch)", device.name(), device.sample_rate(), device.channels());
//!
//! // build the engine at whatever rate the device runs at
//! let (engine, renderer) = Engine::new(EngineConfig::new(device.sample_rate()))?;
//! let stream = device.open(renderer)?;
//! # drop((engine, stream));
//! # Ok::<(), wavevox::Error>(())
//! ```

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};
use tracing::{error, info, warn};

use crate::bridge::BlockBridge;
use crate::error::{Error, Result};
use crate::renderer::Renderer;

/// A discovered audio output device.
pub struct CpalDevice {
    device: cpal::Device,
    config: SupportedStreamConfig,
    name: String,
    sample_rate: u32,
    channels: u16,
}

impl CpalDevice {
    /// The host's default output device, at its default config.
    pub fn default_output() -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoDevice)?;
        Self::from_device(device)
    }

    /// Every output device that reports a usable default config.
    ///
    /// Returns an empty list if enumeration fails.
    pub fn list_outputs() -> Vec<Self> {
        let host = cpal::default_host();
        host.output_devices()
            .map(|devices| devices.filter_map(|device| Self::from_device(device).ok()).collect())
            .unwrap_or_default()
    }

    fn from_device(device: cpal::Device) -> Result<Self> {
        let config = device.default_output_config()?;
        let name = device.name().unwrap_or_else(|_| "Unknown".into());
        Ok(Self {
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
            name,
            device,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device's sample rate in Hz. Build the engine at this rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Start playing `renderer` on this device.
    ///
    /// The renderer moves onto the device's callback thread. Device buffers
    /// of any size are filled from whole engine blocks; stereo is mapped onto
    /// the device's channel layout.
    ///
    /// Fails with [`Error::SampleRateMismatch`] unless the engine was built at
    /// [`sample_rate`](Self::sample_rate); increments are computed against the
    /// engine's rate, so anything else would play out of tune.
    pub fn open(&self, renderer: Renderer) -> Result<OutputStream> {
        let stream_config = self.config.config();
        let channels = stream_config.channels as usize;

        if let Err(err) = check_sample_rate(self.sample_rate, renderer.sample_rate()) {
            warn!(device = %self.name, %err, "refusing to open output stream");
            return Err(err);
        }

        let bridge = BlockBridge::new(renderer);
        let stream = match self.config.sample_format() {
            SampleFormat::F32 => build_stream(&self.device, &stream_config, bridge, channels, |s| s)?,
            SampleFormat::I16 => build_stream(&self.device, &stream_config, bridge, channels, |s| {
                (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
            })?,
            SampleFormat::U16 => build_stream(&self.device, &stream_config, bridge, channels, |s| {
                ((s.clamp(-1.0, 1.0) + 1.0) * 0.5 * u16::MAX as f32) as u16
            })?,
            other => return Err(Error::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        info!(device = %self.name, sample_rate = self.sample_rate, channels, "output stream started");
        Ok(OutputStream {
            stream,
            name: self.name.clone(),
        })
    }
}

fn check_sample_rate(device: u32, engine: u32) -> Result<()> {
    if device == engine {
        Ok(())
    } else {
        Err(Error::SampleRateMismatch { device, engine })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut bridge: BlockBridge,
    channels: usize,
    convert: fn(f32) -> T,
) -> Result<cpal::Stream>
where
    T: SizedSample + Send + 'static,
{
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| bridge.fill_with(data, channels, convert),
        |err| error!(%err, "output stream error"),
        None,
    )?;
    Ok(stream)
}

/// A playing output stream. Playback stops when this is dropped.
pub struct OutputStream {
    stream: cpal::Stream,
    name: String,
}

impl OutputStream {
    pub fn pause(&self) -> Result<()> {
        self.stream.pause()?;
        info!(device = %self.name, "output stream paused");
        Ok(())
    }

    pub fn resume(&self) -> Result<()> {
        self.stream.play()?;
        info!(device = %self.name, "output stream resumed");
        Ok(())
    }
}
