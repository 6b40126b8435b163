use std::sync::{Arc, Mutex, mpsc};

use anyhow::{Result, anyhow};
use cpal::{
    SampleFormat, Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use tokio::runtime::Runtime;

use crate::wav::SoundBuffer;

pub type SharedVoice = Arc<Mutex<Voice>>;

/// The single playback voice. It owns the active sound buffer and resamples
/// it by stepping a fractional frame cursor; the pitch multiplier scales the
/// step, which is how the pitch dial speeds the sound up or slows it down.
pub struct Voice {
    buffer: Arc<SoundBuffer>,
    cursor: f64,
    pitch: f32,
    playing: bool,
    output_rate: f32,
}

impl Voice {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(SoundBuffer::silent()),
            cursor: 0.0,
            pitch: 1.0,
            playing: false,
            output_rate: 44_100.0,
        }
    }

    pub fn set_output_rate(&mut self, rate: f32) {
        self.output_rate = rate.max(1.0);
    }

    /// Swapping the buffer stops any sound in flight and rewinds.
    pub fn set_buffer(&mut self, buffer: Arc<SoundBuffer>) {
        self.buffer = buffer;
        self.cursor = 0.0;
        self.playing = false;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.max(0.0);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn play(&mut self) {
        self.cursor = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn next_sample(&mut self) -> f32 {
        if !self.playing {
            return 0.0;
        }
        let index = self.cursor as usize;
        let Some(sample) = self.buffer.frame(index) else {
            self.playing = false;
            return 0.0;
        };
        self.cursor +=
            f64::from(self.pitch) * f64::from(self.buffer.sample_rate()) / f64::from(self.output_rate);
        sample
    }
}

pub enum PlayerCommand {
    SetBuffer(Arc<SoundBuffer>),
    SetPitch(f32),
    Play,
}

pub type PlayerHandle = (SharedVoice, mpsc::Sender<PlayerCommand>);

/// Spawns the command thread that owns mutations of the shared voice. The
/// game loop sends commands; the cpal callback only pulls samples.
pub fn spawn_player(runtime: &Runtime) -> PlayerHandle {
    let (tx, rx) = mpsc::channel();
    let voice = Arc::new(Mutex::new(Voice::new()));
    let thread_voice = voice.clone();

    runtime.spawn_blocking(move || {
        while let Ok(cmd) = rx.recv() {
            let mut guard = thread_voice.lock().expect("lock voice state");
            match cmd {
                PlayerCommand::SetBuffer(buffer) => guard.set_buffer(buffer),
                PlayerCommand::SetPitch(pitch) => guard.set_pitch(pitch),
                PlayerCommand::Play => guard.play(),
            }
        }
    });

    (voice, tx)
}

pub struct AudioEngine {
    _stream: Stream,
}

impl AudioEngine {
    pub fn start(voice: SharedVoice) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default audio output"))?;
        let supported = device.default_output_config()?;
        let config = supported.config();
        let sample_rate = config.sample_rate.0 as f32;
        {
            let mut guard = voice.lock().expect("voice lock");
            guard.set_output_rate(sample_rate);
        }
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream_f32(&device, &config, voice)?,
            SampleFormat::I16 => build_stream_i16(&device, &config, voice)?,
            SampleFormat::U16 => build_stream_u16(&device, &config, voice)?,
            _ => build_stream_f32(&device, &config, voice)?,
        };
        stream.play()?;
        Ok(Self { _stream: stream })
    }
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voice: SharedVoice,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [f32], _| {
            fill_output_buffer(output, channels, &voice, |sample| sample);
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voice: SharedVoice,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [i16], _| {
            fill_output_buffer(output, channels, &voice, |sample| {
                (sample * i16::MAX as f32) as i16
            });
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voice: SharedVoice,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [u16], _| {
            fill_output_buffer(output, channels, &voice, |sample| {
                let scaled = (sample * 0.5 + 0.5).clamp(0.0, 1.0);
                (scaled * u16::MAX as f32) as u16
            });
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn fill_output_buffer<T, F>(output: &mut [T], channels: usize, voice: &SharedVoice, mut convert: F)
where
    F: FnMut(f32) -> T,
    T: Copy,
{
    let mut guard = voice.lock().expect("voice lock");
    for frame in output.chunks_mut(channels) {
        let sample = guard.next_sample().clamp(-0.98, 0.98);
        let value = convert(sample);
        for channel in frame {
            *channel = value;
        }
    }
}
