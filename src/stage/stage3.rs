// Stage 3: bottom letter row plus the comma / period keys beside it.
use super::StageDesc;

pub static STAGE3: StageDesc = StageDesc {
    id: 3,
    name: "Bottom Row",
    background: "#2a9d8f",
    chars: &["Z", "X", "C", "V", "B", "N", "M", ",", "."],
};
