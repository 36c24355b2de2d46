// Per-run data: created on start, discarded on reset. The high score lives on
// `Game` because it outlives sessions.

use serde::Serialize;

pub const QUESTIONS_PER_STAGE: u8 = 20;
pub const START_LIVES: u8 = 5;
pub const MAX_LIVES: u8 = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub score: u32,
    pub lives: u8,
    /// Position in the selected stage list (fixed mode) or stages entered so far (random mode).
    pub stage_index: usize,
    pub stage_id: u8,
    /// 0..=19 within the current stage.
    pub question_count: u8,
    pub total_stages_completed: u32,
    pub speed: u8,
    /// Characters the selector draws from for this stage.
    #[serde(skip)]
    pub pool: Vec<&'static str>,
}

impl Session {
    pub fn new(stage_id: u8, speed: u8, pool: Vec<&'static str>) -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            stage_index: 0,
            stage_id,
            question_count: 0,
            total_stages_completed: 0,
            speed,
            pool,
        }
    }

    /// Lose one life; returns true when none are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn bonus_life(&mut self) {
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    /// Count a correct answer; returns true when it was the stage's last question.
    pub fn advance_question(&mut self) -> bool {
        if self.question_count + 1 >= QUESTIONS_PER_STAGE {
            true
        } else {
            self.question_count += 1;
            false
        }
    }

    pub fn enter_stage(&mut self, stage_id: u8, pool: Vec<&'static str>) {
        self.stage_index += 1;
        self.stage_id = stage_id;
        self.question_count = 0;
        self.pool = pool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_clamp_at_zero_and_ten() {
        let mut s = Session::new(1, 1, vec!["A"]);
        for _ in 0..START_LIVES - 1 {
            assert!(!s.lose_life());
        }
        assert!(s.lose_life());
        assert!(s.lose_life());
        assert_eq!(s.lives, 0);

        for _ in 0..20 {
            s.bonus_life();
        }
        assert_eq!(s.lives, MAX_LIVES);
    }

    #[test]
    fn twentieth_answer_finishes_stage() {
        let mut s = Session::new(1, 1, vec!["A"]);
        for expected in 1..QUESTIONS_PER_STAGE {
            assert!(!s.advance_question());
            assert_eq!(s.question_count, expected);
        }
        assert!(s.advance_question());
        assert_eq!(s.question_count, 19);
    }

    #[test]
    fn entering_a_stage_resets_question_count() {
        let mut s = Session::new(1, 1, vec!["A"]);
        s.question_count = 12;
        s.enter_stage(2, vec!["Q"]);
        assert_eq!((s.stage_index, s.stage_id, s.question_count), (1, 2, 0));
    }
}
