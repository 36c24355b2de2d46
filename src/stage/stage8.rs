// Stage 8: T row.
use super::StageDesc;

pub static STAGE8: StageDesc = StageDesc {
    id: 8,
    name: "T Row",
    background: "#355070",
    chars: &["た", "ち", "つ", "て", "と"],
};
