// Stage 2: top letter row.
use super::StageDesc;

pub static STAGE2: StageDesc = StageDesc {
    id: 2,
    name: "Top Row",
    background: "#264653",
    chars: &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
};
