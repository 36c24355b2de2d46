// Time-decayed scoring. Speed 1..=5 maps to a per-prompt time limit; a faster
// answer and a harsher speed both earn more.

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 5;

const TIMEOUTS_MS: [f64; 5] = [10_000.0, 8_000.0, 6_000.0, 4_000.0, 2_000.0];
const BASE_POINTS: f64 = 8.0;
const SPEED_BONUS: f64 = 0.2;

/// Prompt time limit for a speed setting (clamped into 1..=5).
pub fn timeout_ms(speed: u8) -> f64 {
    let idx = speed.clamp(MIN_SPEED, MAX_SPEED) - MIN_SPEED;
    TIMEOUTS_MS[idx as usize]
}

/// `ceil(8 × (1 − elapsed/timeout) × (1 + speed×0.2))`, never below 1.
pub fn points(elapsed_ms: f64, speed: u8) -> u32 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    let remaining = (1.0 - elapsed_ms / timeout_ms(speed)).clamp(0.0, 1.0);
    let raw = (BASE_POINTS * remaining * (1.0 + f64::from(speed) * SPEED_BONUS)).ceil();
    (raw as u32).max(1)
}
