// Stage 5: the five vowels, one keystroke each.
use super::StageDesc;

pub static STAGE5: StageDesc = StageDesc {
    id: 5,
    name: "Vowels",
    background: "#e76f51",
    chars: &["あ", "い", "う", "え", "お"],
};
