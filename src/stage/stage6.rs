// Stage 6: K row. Several kana here accept C / Q spellings too.
use super::StageDesc;

pub static STAGE6: StageDesc = StageDesc {
    id: 6,
    name: "K Row",
    background: "#f4a261",
    chars: &["か", "き", "く", "け", "こ"],
};
