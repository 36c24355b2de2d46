// Stage 9: N row plus the moraic ん.
use super::StageDesc;

pub static STAGE9: StageDesc = StageDesc {
    id: 9,
    name: "N Row",
    background: "#3d405b",
    chars: &["な", "に", "ぬ", "ね", "の", "ん"],
};
