//! SynthHandle: main-thread interface to the synth.
//!
//! The `cpal` stream is built and owned by a dedicated audio thread, which
//! parks until shutdown. Notes reach the stream callback over a crossbeam
//! channel and are scheduled there in samples, so `trigger` never blocks.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender};

use chordmaster_types::{NotePlayer, Pitch};

use crate::error::AudioError;
use crate::mixer::Mixer;
use crate::voice::Voice;

#[derive(Debug, Clone, Copy)]
enum SynthCmd {
    NoteOn {
        frequency: f32,
        delay: Duration,
        sustain: Duration,
    },
    Silence,
}

pub struct SynthHandle {
    cmd_tx: Sender<SynthCmd>,
    shutdown_tx: Sender<()>,
    join_handle: Option<JoinHandle<()>>,
}

impl SynthHandle {
    /// Open the default output device. Fails if there is none or the stream
    /// cannot be started.
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
        let (ready_tx, ready_rx) = mpsc::channel();

        let join_handle = thread::Builder::new()
            .name("chordmaster-audio".into())
            .spawn(move || {
                let stream = match open_stream(cmd_rx, volume) {
                    Ok((stream, sample_rate)) => {
                        let _ = ready_tx.send(Ok(sample_rate));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                // Park until the handle goes away; dropping the stream stops output.
                let _ = shutdown_rx.recv();
                drop(stream);
                log::debug!(target: "audio", "audio thread stopped");
            })
            .map_err(|e| AudioError::Unavailable(format!("could not spawn audio thread: {e}")))?;

        let sample_rate = match ready_rx.recv() {
            Ok(Ok(rate)) => rate,
            Ok(Err(e)) => {
                let _ = join_handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = join_handle.join();
                return Err(AudioError::Unavailable("audio thread exited during startup".into()));
            }
        };

        log::info!(target: "audio", "output running at {} Hz", sample_rate);
        Ok(Self {
            cmd_tx,
            shutdown_tx,
            join_handle: Some(join_handle),
        })
    }

    /// Fire-and-forget: send a command and log if the stream is gone.
    fn send(&self, cmd: SynthCmd) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            log::warn!(target: "audio", "command dropped: {:?}", e.into_inner());
        }
    }
}

impl NotePlayer for SynthHandle {
    fn trigger(&self, pitch: Pitch, sustain: Duration, offset: Duration) {
        log::trace!(target: "audio", "note {} at +{:?} for {:?}", pitch, offset, sustain);
        self.send(SynthCmd::NoteOn {
            frequency: pitch.frequency(),
            delay: offset,
            sustain,
        });
    }

    fn silence(&self) {
        self.send(SynthCmd::Silence);
    }
}

impl Drop for SynthHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

fn open_stream(cmd_rx: Receiver<SynthCmd>, volume: f32) -> Result<(Stream, u32), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioError::Unavailable("no output device".into()))?;
    let supported = device
        .default_output_config()
        .map_err(|e| AudioError::Unavailable(format!("no usable output config: {e}")))?;

    if let Ok(name) = device.name() {
        log::info!(target: "audio", "using output device {}", name);
    }

    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.into();
    let sample_rate = config.sample_rate.0;

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, cmd_rx, volume),
        SampleFormat::I16 => build_stream::<i16>(&device, &config, cmd_rx, volume),
        SampleFormat::U16 => build_stream::<u16>(&device, &config, cmd_rx, volume),
        other => Err(AudioError::Unavailable(format!(
            "unsupported sample format {other:?}"
        ))),
    }?;

    stream
        .play()
        .map_err(|e| AudioError::Unavailable(format!("could not start output stream: {e}")))?;
    Ok((stream, sample_rate))
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    cmd_rx: Receiver<SynthCmd>,
    volume: f32,
) -> Result<Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let sample_rate = config.sample_rate.0;
    let mut mixer = Mixer::new(volume);
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                while let Ok(cmd) = cmd_rx.try_recv() {
                    match cmd {
                        SynthCmd::NoteOn {
                            frequency,
                            delay,
                            sustain,
                        } => mixer.add(Voice::new(frequency, sample_rate, delay, sustain)),
                        SynthCmd::Silence => mixer.clear(),
                    }
                }

                scratch.resize(data.len(), 0.0);
                mixer.render(&mut scratch, channels);
                for (out, sample) in data.iter_mut().zip(&scratch) {
                    *out = T::from_sample(*sample);
                }
            },
            |err| {
                log::error!(target: "audio", "output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| AudioError::Unavailable(format!("could not build output stream: {e}")))
}
