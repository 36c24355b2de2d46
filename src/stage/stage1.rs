// Stage 1: home row. F and J are the anchors and are only served as drills.
use super::StageDesc;

pub static STAGE1: StageDesc = StageDesc {
    id: 1,
    name: "Home Row",
    background: "#1d3557",
    chars: &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
};
