// Stage 7: S row (し has three spellings).
use super::StageDesc;

pub static STAGE7: StageDesc = StageDesc {
    id: 7,
    name: "S Row",
    background: "#b56576",
    chars: &["さ", "し", "す", "せ", "そ"],
};
