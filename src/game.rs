//! The game state machine.
//!
//! `start → countdown → playing → stageClear | clear | gameOver`, with
//! `stageClear → countdown` on continue and `reset` back to `start` from
//! anywhere. The machine is sans-IO: every intent, keystroke and timer
//! delivery returns the `Command`s the host must carry out (arm or clear a
//! browser timer, play a cue, show an effect, persist the high score). Time
//! arrives as a millisecond timestamp from the caller.

use serde::Serialize;

use crate::audio::SoundCue;
use crate::catalog::Catalog;
use crate::effects::EffectRequest;
use crate::error::GameError;
use crate::hands::{self, FingerHint};
use crate::matcher::{self, InputBuffer, MatchOutcome};
use crate::rng::RandomSource;
use crate::scorer;
use crate::selector::WordSelector;
use crate::session::{QUESTIONS_PER_STAGE, Session};
use crate::settings::Settings;
use crate::timer::{TimerKind, TimerTicket, Timers};

pub const COUNTDOWN_FROM: u8 = 3;
pub const COUNTDOWN_TICK_MS: f64 = 1_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameState {
    Start,
    Countdown { remaining: u8 },
    Playing,
    StageClear,
    Clear,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MissKind {
    Mismatch,
    Timeout,
}

/// Side effects for the host to perform, in order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Command {
    /// Schedule `ticket` for delivery after `delay_ms`, replacing any pending timer of its kind.
    ArmTimer { ticket: TimerTicket, delay_ms: f64 },
    CancelTimer(TimerKind),
    Sound(SoundCue),
    Effect(EffectRequest),
    PersistHighScore(u32),
    Missed(MissKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub character: &'static str,
    pub created_at: f64,
}

/// Read-only view for the presentation layer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: GameState,
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    pub stage_id: Option<u8>,
    pub stage_name: Option<&'static str>,
    pub background: Option<&'static str>,
    pub question: u8,
    pub questions_per_stage: u8,
    pub stages_completed: u32,
    pub prompt: Option<&'static str>,
    pub typed: String,
    pub next_key: Option<char>,
    pub finger: Option<FingerHint>,
    pub deadline_ms: Option<f64>,
}

pub struct Game {
    catalog: Catalog,
    settings: Settings,
    state: GameState,
    session: Option<Session>,
    high_score: u32,
    prompt: Option<Prompt>,
    buffer: InputBuffer,
    selector: WordSelector,
    timers: Timers,
    rng: Box<dyn RandomSource>,
}

impl Game {
    /// `high_score` is the persisted value loaded by the host.
    pub fn new(
        catalog: Catalog,
        settings: Settings,
        high_score: u32,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, GameError> {
        settings.validate(&catalog)?;
        let selector = WordSelector::new(catalog.anchors());
        Ok(Self {
            catalog,
            settings,
            state: GameState::Start,
            session: None,
            high_score,
            prompt: None,
            buffer: InputBuffer::default(),
            selector,
            timers: Timers::default(),
            rng,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn typed(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace settings. Only allowed on the start screen.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), GameError> {
        if self.state != GameState::Start {
            return Err(GameError::InvalidSettings(
                "settings can only change on the start screen".into(),
            ));
        }
        settings.validate(&self.catalog)?;
        self.settings = settings;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let stage = self
            .session
            .as_ref()
            .and_then(|s| self.catalog.stage(s.stage_id));
        let next_key = self.prompt.and_then(|p| {
            matcher::next_key_hint(self.catalog.spellings(p.character), self.buffer.as_str())
        });
        Snapshot {
            state: self.state,
            score: self.session.as_ref().map_or(0, |s| s.score),
            high_score: self.high_score,
            lives: self.session.as_ref().map_or(0, |s| s.lives),
            stage_id: stage.map(|s| s.id),
            stage_name: stage.map(|s| s.name),
            background: stage.map(|s| s.background),
            question: self.session.as_ref().map_or(0, |s| s.question_count),
            questions_per_stage: QUESTIONS_PER_STAGE,
            stages_completed: self.session.as_ref().map_or(0, |s| s.total_stages_completed),
            prompt: self.prompt.map(|p| p.character),
            typed: self.buffer.as_str().to_string(),
            next_key,
            finger: next_key.and_then(hands::finger_for),
            deadline_ms: self
                .prompt
                .map(|p| p.created_at + scorer::timeout_ms(self.settings.speed)),
        }
    }

    // --- Intents --------------------------------------------------------------

    /// Start a new session from the start screen.
    pub fn start(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if self.state != GameState::Start {
            return out;
        }
        let stage_id = if self.settings.random_mode {
            self.pick_random_stage(None)
        } else {
            self.settings.selected_stages[0]
        };
        let pool = self.pool_for(stage_id);
        self.session = Some(Session::new(stage_id, self.settings.speed, pool));
        self.selector.forget();
        log::info!(
            "session start: stage {} speed {} random={}",
            stage_id,
            self.settings.speed,
            self.settings.random_mode
        );
        self.begin_countdown(&mut out);
        out
    }

    /// Leave the stage-clear screen for the next stage's countdown.
    pub fn continue_stage(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if self.state != GameState::StageClear {
            return out;
        }
        let Some((current_id, index)) = self.session.as_ref().map(|s| (s.stage_id, s.stage_index))
        else {
            return out;
        };
        let next_id = if self.settings.random_mode {
            self.pick_random_stage(Some(current_id))
        } else {
            match self.settings.selected_stages.get(index + 1) {
                Some(id) => *id,
                None => return out,
            }
        };
        let pool = self.pool_for(next_id);
        if let Some(session) = self.session.as_mut() {
            session.enter_stage(next_id, pool);
        }
        log::info!("entering stage {}", next_id);
        self.begin_countdown(&mut out);
        out
    }

    /// Back to the start screen from any state. The high score survives.
    pub fn reset(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        self.halt(&mut out);
        self.session = None;
        self.selector.forget();
        self.state = GameState::Start;
        out
    }

    /// Clear every armed timer without changing state (page teardown).
    pub fn teardown(&mut self) -> Vec<Command> {
        self.timers
            .cancel_all()
            .into_iter()
            .map(Command::CancelTimer)
            .collect()
    }

    // --- Events ---------------------------------------------------------------

    /// Raw key press. Ignored outside play, while composing, and for keys
    /// outside the typeable set.
    pub fn key_press(&mut self, key: &str, composing: bool, now: f64) -> Vec<Command> {
        let mut out = Vec::new();
        if self.state != GameState::Playing {
            return out;
        }
        let Some(c) = matcher::accept_key(key, composing) else {
            return out;
        };
        let Some(prompt) = self.prompt else {
            return out;
        };
        self.buffer.push(c);
        let spellings = self.catalog.spellings(prompt.character);
        match matcher::match_input(spellings, self.buffer.as_str()) {
            MatchOutcome::Partial => out.push(Command::Sound(SoundCue::Keystroke)),
            MatchOutcome::Complete => self.success(prompt, now, &mut out),
            MatchOutcome::Miss => self.miss(MissKind::Mismatch, now, &mut out),
        }
        out
    }

    /// Deliver a timer. Superseded or cancelled tickets are no-ops, and the
    /// live state is re-checked before acting.
    pub fn on_timer(&mut self, ticket: TimerTicket, now: f64) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.timers.fire(ticket) {
            log::debug!("stale timer {:?} ignored", ticket);
            return out;
        }
        match (ticket.kind, self.state) {
            (TimerKind::Countdown, GameState::Countdown { remaining }) if remaining > 1 => {
                self.state = GameState::Countdown {
                    remaining: remaining - 1,
                };
                self.arm(TimerKind::Countdown, COUNTDOWN_TICK_MS, &mut out);
                out.push(Command::Sound(SoundCue::CountdownTick));
            }
            (TimerKind::Countdown, GameState::Countdown { .. }) => {
                self.state = GameState::Playing;
                out.push(Command::Sound(SoundCue::Go));
                self.present_prompt(now, &mut out);
            }
            (TimerKind::PromptTimeout, GameState::Playing) => {
                self.miss(MissKind::Timeout, now, &mut out);
            }
            (kind, state) => log::debug!("{:?} timer ignored in {:?}", kind, state),
        }
        out
    }

    // --- Internals ------------------------------------------------------------

    fn begin_countdown(&mut self, out: &mut Vec<Command>) {
        self.prompt = None;
        self.buffer.clear();
        self.state = GameState::Countdown {
            remaining: COUNTDOWN_FROM,
        };
        self.arm(TimerKind::Countdown, COUNTDOWN_TICK_MS, out);
        out.push(Command::Sound(SoundCue::CountdownTick));
    }

    fn arm(&mut self, kind: TimerKind, delay_ms: f64, out: &mut Vec<Command>) {
        let ticket = self.timers.arm(kind);
        out.push(Command::ArmTimer { ticket, delay_ms });
    }

    fn present_prompt(&mut self, now: f64, out: &mut Vec<Command>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let character = self
            .selector
            .next(session.question_count, &session.pool, self.rng.as_mut());
        let timeout = scorer::timeout_ms(session.speed);
        log::debug!("prompt {} (question {})", character, session.question_count);
        self.prompt = Some(Prompt {
            character,
            created_at: now,
        });
        self.buffer.clear();
        self.arm(TimerKind::PromptTimeout, timeout, out);
    }

    fn success(&mut self, prompt: Prompt, now: f64, out: &mut Vec<Command>) {
        self.buffer.clear();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let points = scorer::points(now - prompt.created_at, session.speed);
        session.score = session.score.saturating_add(points);
        let score = session.score;
        let stage_done = session.advance_question();

        out.push(Command::Sound(SoundCue::Success));
        out.push(Command::Effect(EffectRequest::Burst));
        out.push(Command::Effect(EffectRequest::ScorePopup { points }));
        if score > self.high_score {
            self.high_score = score;
            out.push(Command::PersistHighScore(score));
        }

        if stage_done {
            self.finish_stage(out);
        } else {
            self.present_prompt(now, out);
        }
    }

    fn miss(&mut self, kind: MissKind, now: f64, out: &mut Vec<Command>) {
        self.buffer.clear();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let out_of_lives = session.lose_life();
        log::debug!("{:?} miss, {} lives left", kind, session.lives);
        out.push(Command::Missed(kind));
        out.push(Command::Sound(SoundCue::Miss));
        out.push(Command::Effect(EffectRequest::MissFlash));

        if out_of_lives {
            self.halt(out);
            self.state = GameState::GameOver;
            out.push(Command::Sound(SoundCue::GameOver));
            log::info!(
                "game over with score {}",
                self.session.as_ref().map_or(0, |s| s.score)
            );
        } else {
            self.present_prompt(now, out);
        }
    }

    fn finish_stage(&mut self, out: &mut Vec<Command>) {
        self.halt(out);
        let random_mode = self.settings.random_mode;
        let target = self.settings.random_target;
        let selected = self.settings.selected_stages.len();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let all_clear = if random_mode {
            session.total_stages_completed + 1 >= target
        } else {
            session.stage_index + 1 >= selected
        };
        session.total_stages_completed += 1;

        if all_clear {
            self.state = GameState::Clear;
            out.push(Command::Sound(SoundCue::AllClear));
            log::info!("all stages clear with score {}", session.score);
        } else {
            session.bonus_life();
            self.state = GameState::StageClear;
            out.push(Command::Sound(SoundCue::StageClear));
            log::info!("stage {} clear", session.stage_id);
        }
    }

    /// Cancel every timer and drop the live prompt.
    fn halt(&mut self, out: &mut Vec<Command>) {
        for kind in self.timers.cancel_all() {
            out.push(Command::CancelTimer(kind));
        }
        self.prompt = None;
        self.buffer.clear();
    }

    fn pool_for(&self, stage_id: u8) -> Vec<&'static str> {
        if self.settings.random_mode {
            self.catalog.pool(&self.settings.selected_stages)
        } else {
            self.catalog.pool(&[stage_id])
        }
    }

    /// Random-mode stage pick over the distinct selected ids; avoids repeating
    /// `current` when there is a choice.
    fn pick_random_stage(&mut self, current: Option<u8>) -> u8 {
        let mut choices: Vec<u8> = Vec::new();
        for &id in &self.settings.selected_stages {
            if Some(id) != current && !choices.contains(&id) {
                choices.push(id);
            }
        }
        if choices.is_empty() {
            return current
                .or_else(|| self.settings.selected_stages.first().copied())
                .unwrap_or_default();
        }
        choices[self.rng.below(choices.len())]
    }
}
