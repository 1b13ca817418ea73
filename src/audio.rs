//! Audio capture module using cpal

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, info, warn};

pub const SAMPLE_RATE: u32 = 16000;
const CHUNK_SIZE: usize = 1024;

/// A running microphone stream. Capture stops when this is dropped.
///
/// cpal streams are not `Send`; create and drop the capture on one thread.
pub struct Capture {
    _stream: cpal::Stream,
    rx: Receiver<Vec<i16>>,
}

impl Capture {
    /// Audio chunks as they arrive (16 kHz mono i16)
    pub fn chunks(&self) -> &Receiver<Vec<i16>> {
        &self.rx
    }
}

/// Open the selected (or default) input device and start capturing
pub fn start_capture(device_index: Option<usize>) -> Result<Capture> {
    let host = cpal::default_host();

    let device = if let Some(idx) = device_index {
        host.input_devices()?
            .nth(idx)
            .context("Device index out of range")?
    } else {
        host.default_input_device()
            .context("No default input device")?
    };

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    info!("🎙️ Listening on: {}", device_name);

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Fixed(CHUNK_SIZE as u32),
    };

    let (tx, rx) = mpsc::channel();

    let stream = device.build_input_stream(
        &config,
        move |data: &[i16], _: &cpal::InputCallbackInfo| {
            if tx.send(data.to_vec()).is_err() {
                debug!("Audio receiver dropped");
            }
        },
        |err| {
            warn!("Audio stream error: {}", err);
        },
        None,
    )?;

    stream.play()?;

    Ok(Capture {
        _stream: stream,
        rx,
    })
}

/// Names of the available input devices, by index
pub fn list_input_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    Ok(host
        .input_devices()?
        .map(|d| d.name().unwrap_or_else(|_| "Unknown".to_string()))
        .collect())
}
