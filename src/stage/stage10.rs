// Stage 10: long vowel mark and Japanese punctuation, typed with - , .
use super::StageDesc;

pub static STAGE10: StageDesc = StageDesc {
    id: 10,
    name: "Marks",
    background: "#22223b",
    chars: &["ー", "、", "。"],
};
