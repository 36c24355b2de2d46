//! Fire-and-forget sound cues.
//!
//! Gameplay only names a `SoundCue`; each cue expands to a short tone
//! sequence played through a `ToneSink`. Playback failures are logged and
//! dropped, never surfaced to gameplay.

use serde::Serialize;
use web_sys::{AudioContext, OscillatorType};

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SoundCue {
    Keystroke,
    Success,
    Miss,
    CountdownTick,
    Go,
    StageClear,
    AllClear,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub waveform: Waveform,
    pub duration_ms: f64,
    pub volume: f32,
    /// Offset from the start of the cue.
    pub delay_ms: f64,
}

const fn tone(frequency: f32, waveform: Waveform, duration_ms: f64, volume: f32, delay_ms: f64) -> Tone {
    Tone { frequency, waveform, duration_ms, volume, delay_ms }
}

use Waveform::*;

const KEYSTROKE: &[Tone] = &[tone(1200.0, Sine, 30.0, 0.05, 0.0)];
const SUCCESS: &[Tone] = &[
    tone(880.0, Triangle, 80.0, 0.15, 0.0),
    tone(1320.0, Triangle, 120.0, 0.15, 70.0),
];
const MISS: &[Tone] = &[tone(140.0, Sawtooth, 220.0, 0.12, 0.0)];
const COUNTDOWN_TICK: &[Tone] = &[tone(660.0, Square, 90.0, 0.08, 0.0)];
const GO: &[Tone] = &[tone(990.0, Square, 220.0, 0.1, 0.0)];
const STAGE_CLEAR: &[Tone] = &[
    tone(523.25, Triangle, 120.0, 0.15, 0.0),
    tone(659.25, Triangle, 120.0, 0.15, 120.0),
    tone(783.99, Triangle, 240.0, 0.15, 240.0),
];
const ALL_CLEAR: &[Tone] = &[
    tone(523.25, Triangle, 120.0, 0.15, 0.0),
    tone(659.25, Triangle, 120.0, 0.15, 120.0),
    tone(783.99, Triangle, 120.0, 0.15, 240.0),
    tone(1046.5, Triangle, 400.0, 0.18, 360.0),
];
const GAME_OVER: &[Tone] = &[
    tone(392.0, Sawtooth, 200.0, 0.12, 0.0),
    tone(311.13, Sawtooth, 200.0, 0.12, 200.0),
    tone(261.63, Sawtooth, 420.0, 0.12, 400.0),
];

impl SoundCue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundCue::Keystroke => KEYSTROKE,
            SoundCue::Success => SUCCESS,
            SoundCue::Miss => MISS,
            SoundCue::CountdownTick => COUNTDOWN_TICK,
            SoundCue::Go => GO,
            SoundCue::StageClear => STAGE_CLEAR,
            SoundCue::AllClear => ALL_CLEAR,
            SoundCue::GameOver => GAME_OVER,
        }
    }
}

pub trait ToneSink {
    fn play(&mut self, tone: &Tone) -> Result<(), GameError>;
}

/// Play every tone of `cue`, swallowing (and logging) failures.
pub fn play_cue(sink: &mut dyn ToneSink, cue: SoundCue, muted: bool) {
    if muted {
        return;
    }
    for tone in cue.tones() {
        if let Err(err) = sink.play(tone) {
            log::warn!("sound cue {:?} dropped: {}", cue, err);
            return;
        }
    }
}

/// Web Audio oscillator sink.
pub struct WebAudio {
    ctx: AudioContext,
}

impl WebAudio {
    pub fn new() -> Result<Self, GameError> {
        let ctx = AudioContext::new().map_err(|e| GameError::Audio(format!("{:?}", e)))?;
        Ok(Self { ctx })
    }
}

impl ToneSink for WebAudio {
    fn play(&mut self, tone: &Tone) -> Result<(), GameError> {
        let audio_err = |e: wasm_bindgen::JsValue| GameError::Audio(format!("{:?}", e));
        let osc = self.ctx.create_oscillator().map_err(audio_err)?;
        osc.set_type(match tone.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        });
        osc.frequency().set_value(tone.frequency);

        let gain = self.ctx.create_gain().map_err(audio_err)?;
        let start = self.ctx.current_time() + tone.delay_ms / 1000.0;
        let end = start + tone.duration_ms / 1000.0;
        gain.gain()
            .set_value_at_time(tone.volume, start)
            .map_err(audio_err)?;
        // exponential ramps cannot reach 0
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, end)
            .map_err(audio_err)?;

        osc.connect_with_audio_node(&gain).map_err(audio_err)?;
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(audio_err)?;
        osc.start_with_when(start).map_err(audio_err)?;
        osc.stop_with_when(end).map_err(audio_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<Tone>,
        fail_after: Option<usize>,
    }

    impl ToneSink for Recorder {
        fn play(&mut self, tone: &Tone) -> Result<(), GameError> {
            if self.fail_after == Some(self.played.len()) {
                return Err(GameError::Audio("context suspended".into()));
            }
            self.played.push(*tone);
            Ok(())
        }
    }

    #[test]
    fn cue_plays_all_tones() {
        let mut rec = Recorder::default();
        play_cue(&mut rec, SoundCue::StageClear, false);
        assert_eq!(rec.played.len(), 3);
    }

    #[test]
    fn muted_plays_nothing() {
        let mut rec = Recorder::default();
        play_cue(&mut rec, SoundCue::Success, true);
        assert!(rec.played.is_empty());
    }

    #[test]
    fn failure_is_swallowed() {
        let mut rec = Recorder { fail_after: Some(1), ..Recorder::default() };
        play_cue(&mut rec, SoundCue::AllClear, false);
        assert_eq!(rec.played.len(), 1);
    }

    #[test]
    fn every_cue_has_audible_tones() {
        use SoundCue::*;
        for cue in [Keystroke, Success, Miss, CountdownTick, Go, StageClear, AllClear, GameOver] {
            let tones = cue.tones();
            assert!(!tones.is_empty());
            for t in tones {
                assert!(t.frequency > 20.0 && t.volume > 0.0 && t.duration_ms > 0.0);
            }
        }
    }
}
