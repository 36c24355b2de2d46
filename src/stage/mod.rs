//! Stage definitions. Each stage is an immutable character set plus the
//! cosmetic bits (name, background colour) the presentation layer shows.
//!
//! Stages live one per file under `src/stage/`; `builtin()` collects them in
//! play order.

use serde::Serialize;

mod stage1;
mod stage10;
mod stage2;
mod stage3;
mod stage4;
mod stage5;
mod stage6;
mod stage7;
mod stage8;
mod stage9;

pub use stage1::STAGE1;
pub use stage2::STAGE2;
pub use stage3::STAGE3;
pub use stage4::STAGE4;
pub use stage5::STAGE5;
pub use stage6::STAGE6;
pub use stage7::STAGE7;
pub use stage8::STAGE8;
pub use stage9::STAGE9;
pub use stage10::STAGE10;

/// Home-row drill characters, served on every 4th question.
pub const ANCHORS: [&str; 2] = ["F", "J"];

/// Stage descriptor (immutable).
#[derive(Debug, Serialize)]
pub struct StageDesc {
    pub id: u8,
    pub name: &'static str,
    pub background: &'static str,
    pub chars: &'static [&'static str],
}

/// All built-in stages in play order.
pub fn builtin() -> &'static [&'static StageDesc] {
    static STAGES: [&StageDesc; 10] = [
        &STAGE1, &STAGE2, &STAGE3, &STAGE4, &STAGE5, &STAGE6, &STAGE7, &STAGE8, &STAGE9, &STAGE10,
    ];
    &STAGES
}
