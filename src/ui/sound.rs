/// Sound cues: short procedural tones via rodio.
///
/// Every cue is rendered to an in-memory WAV buffer once at start-up and
/// played fire-and-forget. Build without the "sound" feature to get a stub
/// `SoundEngine` that does nothing.

use crate::sim::event::GameEvent;

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    pub(super) const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        pub(super) sfx_correct: Arc<Vec<u8>>,
        pub(super) sfx_wrong: Arc<Vec<u8>>,
        pub(super) sfx_level_up: Arc<Vec<u8>>,
        pub(super) sfx_length_ok: Arc<Vec<u8>>,
        pub(super) sfx_length_miss: Arc<Vec<u8>>,
        pub(super) sfx_reveal: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output, sound disabled: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                // C6 → G6 ding
                sfx_correct: wav(&notes(&[(1047.0, 0.06), (1568.0, 0.14)], true)),
                // low falling buzz
                sfx_wrong: wav(&sweep(320.0, 110.0, 0.35)),
                // C5 E5 G5 C6
                sfx_level_up: wav(&notes(&[(523.0, 0.08), (659.0, 0.08), (784.0, 0.08), (1047.0, 0.22)], true)),
                sfx_length_ok: wav(&notes(&[(880.0, 0.05)], false)),
                sfx_length_miss: wav(&notes(&[(220.0, 0.08)], false)),
                sfx_reveal: wav(&notes(&[(659.0, 0.09), (523.0, 0.09), (440.0, 0.16)], false)),
            })
        }

        pub(super) fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    fn wav(samples: &[f32]) -> Arc<Vec<u8>> {
        Arc::new(super::make_wav(samples, SAMPLE_RATE))
    }

    /// Sequence of sine notes with a per-note decay. `bright` adds an octave
    /// harmonic.
    pub(super) fn notes(seq: &[(f32, f32)], bright: bool) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, dur) in seq {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.6);
                let phase = t * freq * 2.0 * std::f32::consts::PI;
                let wave = if bright {
                    phase.sin() * 0.7 + (phase * 2.0).sin() * 0.3
                } else {
                    phase.sin()
                };
                samples.push(wave * env * 0.28);
            }
        }
        samples
    }

    /// Linear pitch glide from `from` to `to` Hz.
    fn sweep(from: f32, to: f32, dur: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * dur) as usize;
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = from + (to - from) * t;
                phase += freq * 2.0 * std::f32::consts::PI / SAMPLE_RATE as f32;
                // square-ish for a harsher edge
                let wave = phase.sin().signum() * 0.4 + phase.sin() * 0.6;
                wave * (1.0 - t).powf(0.7) * 0.22
            })
            .collect()
    }
}

// ════════════════════════════════════════════════════════════
//  WAV encoder: 16-bit mono PCM
// ════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn make_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let block_align: u16 = bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = samples.len() as u32 * block_align as u32;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // mono
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
        buf.extend_from_slice(&val.to_le_bytes());
    }

    buf
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(feature = "sound")]
impl SoundEngine {
    pub fn play_event(&self, event: &GameEvent) {
        let buf = match event {
            GameEvent::LengthCorrect => &self.sfx_length_ok,
            GameEvent::LengthWrong => &self.sfx_length_miss,
            GameEvent::SpellingCorrect => &self.sfx_correct,
            GameEvent::LevelUp { .. } => &self.sfx_level_up,
            GameEvent::SpellingWrong => &self.sfx_wrong,
            GameEvent::AnswerRevealed => &self.sfx_reveal,
        };
        self.play(buf);
    }
}

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_event(&self, _event: &GameEvent) {}
}
