// Stage 4: number row. Hyphen sits at the right end of the row on most layouts.
use super::StageDesc;

pub static STAGE4: StageDesc = StageDesc {
    id: 4,
    name: "Number Row",
    background: "#6d597a",
    chars: &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-"],
};
