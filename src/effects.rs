//! Presentation-owned transient effects: particle bursts, score popups and a
//! miss flash. Gameplay only requests them (`EffectRequest`); the list owns
//! their lifetime and drops each one once its display duration has passed.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::rng;

pub const PARTICLE_MS: f64 = 600.0;
pub const POPUP_MS: f64 = 900.0;
pub const FLASH_MS: f64 = 250.0;

/// What gameplay asks the presentation layer to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EffectRequest {
    Burst,
    ScorePopup { points: u32 },
    MissFlash,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    Particle { vx: f64, vy: f64, hue: f64 },
    ScorePopup { points: u32 },
    MissFlash,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub x: f64,
    pub y: f64,
    pub start_ms: f64,
}

impl Effect {
    pub fn lifetime_ms(&self) -> f64 {
        match self.kind {
            EffectKind::Particle { .. } => PARTICLE_MS,
            EffectKind::ScorePopup { .. } => POPUP_MS,
            EffectKind::MissFlash => FLASH_MS,
        }
    }

    /// Fraction of lifetime elapsed, 0..=1.
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.start_ms) / self.lifetime_ms()).clamp(0.0, 1.0)
    }

    pub fn alpha(&self, now: f64) -> f64 {
        1.0 - self.progress(now)
    }

    /// Current draw position. Particles drift with gravity, popups float up.
    pub fn position(&self, now: f64) -> (f64, f64) {
        let t = (now - self.start_ms).max(0.0) / 1000.0;
        match self.kind {
            EffectKind::Particle { vx, vy, .. } => {
                (self.x + vx * t, self.y + vy * t + 0.5 * 480.0 * t * t)
            }
            EffectKind::ScorePopup { .. } => (self.x, self.y - 60.0 * self.progress(now)),
            EffectKind::MissFlash => (self.x, self.y),
        }
    }
}

#[derive(Debug)]
pub struct EffectList {
    items: Vec<Effect>,
    rng: SmallRng,
}

impl EffectList {
    pub fn new(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            rng: rng::seeded(seed),
        }
    }

    pub fn spawn(&mut self, request: EffectRequest, x: f64, y: f64, now: f64) {
        match request {
            EffectRequest::Burst => self.burst(x, y, 14, now),
            EffectRequest::ScorePopup { points } => self.items.push(Effect {
                kind: EffectKind::ScorePopup { points },
                x,
                y,
                start_ms: now,
            }),
            EffectRequest::MissFlash => self.items.push(Effect {
                kind: EffectKind::MissFlash,
                x,
                y,
                start_ms: now,
            }),
        }
    }

    fn burst(&mut self, x: f64, y: f64, count: usize, now: f64) {
        for i in 0..count {
            let jitter: f64 = self.rng.gen_range(0.0..1.0);
            let angle = std::f64::consts::TAU * (i as f64 + jitter) / count as f64;
            let speed = 120.0 + 160.0 * self.rng.gen_range(0.0..1.0);
            self.items.push(Effect {
                kind: EffectKind::Particle {
                    vx: angle.cos() * speed,
                    vy: angle.sin() * speed - 120.0,
                    hue: 360.0 * self.rng.gen_range(0.0..1.0),
                },
                x,
                y,
                start_ms: now,
            });
        }
    }

    /// Drop every effect whose display duration has elapsed.
    pub fn prune(&mut self, now: f64) {
        self.items.retain(|e| now - e.start_ms < e.lifetime_ms());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
