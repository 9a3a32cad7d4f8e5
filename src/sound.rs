//! Procedurally generated audio cues.
//!
//! Tones are synthesised into 16-bit mono PCM, wrapped in a WAV header and
//! handed to whichever system player is installed. Playback happens on a
//! detached thread; any failure is logged and dropped.

use std::f32::consts::PI;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

pub const SAMPLE_RATE: u32 = 22_050;

/// Candidate players, tried in order
const PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A single tone with exponential frequency and gain ramps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    pub seconds: f32,
}

/// Which cue to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// End of a countdown: A5 falling to A4
    Notification,
    /// Short tick for start/pause and mode buttons
    Click,
}

impl Cue {
    pub fn tone(self) -> Tone {
        match self {
            Cue::Notification => Tone {
                waveform: Waveform::Sine,
                start_hz: 880.0,
                end_hz: 440.0,
                start_gain: 0.5,
                end_gain: 0.01,
                seconds: 0.5,
            },
            Cue::Click => Tone {
                waveform: Waveform::Triangle,
                start_hz: 600.0,
                end_hz: 600.0,
                start_gain: 0.1,
                end_gain: 0.01,
                seconds: 0.1,
            },
        }
    }
}

/// Where cues go. The app holds one of these; tests swap in a recorder.
pub trait Chime {
    fn play(&self, cue: Cue);
}

/// Plays cues through the system audio player
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemChime;

impl Chime for SystemChime {
    fn play(&self, cue: Cue) {
        std::thread::spawn(move || {
            if let Err(e) = play_blocking(cue) {
                warn!(?cue, error = %e, "audio play failed");
            }
        });
    }
}

fn play_blocking(cue: Cue) -> anyhow::Result<()> {
    let samples = synthesize(&cue.tone(), SAMPLE_RATE);
    let wav = encode_wav(&samples, SAMPLE_RATE);

    let mut file = tempfile::Builder::new()
        .prefix("focusflow-")
        .suffix(".wav")
        .tempfile()?;
    file.write_all(&wav)?;
    file.as_file().sync_all()?;

    for player in PLAYERS {
        match Command::new(player)
            .arg(file.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => {
                debug!(player, ?cue, "played cue");
                return Ok(());
            }
            Ok(status) => debug!(player, %status, "player exited with failure"),
            Err(_) => continue,
        }
    }

    anyhow::bail!("no working audio player found (tried {})", PLAYERS.join(", "))
}

/// Value of an exponential ramp from `from` to `to` at fraction `t` (0..=1)
fn exp_ramp(from: f32, to: f32, t: f32) -> f32 {
    from * (to / from).powf(t)
}

/// Render a tone into samples in -1.0..=1.0
pub fn synthesize(tone: &Tone, sample_rate: u32) -> Vec<f32> {
    let total = (tone.seconds * sample_rate as f32).round() as usize;
    let mut samples = Vec::with_capacity(total);
    let mut phase = 0.0f32;

    for i in 0..total {
        let t = i as f32 / total as f32;
        let freq = exp_ramp(tone.start_hz, tone.end_hz, t);
        let gain = exp_ramp(tone.start_gain, tone.end_gain, t);

        let value = match tone.waveform {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        };
        samples.push(value * gain);

        phase = (phase + freq / sample_rate as f32).fract();
    }

    samples
}

/// Wrap samples as a 16-bit mono PCM WAV file
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }

    out
}
