// Accepted spellings per prompt character.
// Keyboard stages spell themselves; kana accept every common romaji variant.

pub const SPELLINGS: &[(&str, &[&str])] = &[
    // Letters
    ("A", &["A"]), ("B", &["B"]), ("C", &["C"]), ("D", &["D"]), ("E", &["E"]),
    ("F", &["F"]), ("G", &["G"]), ("H", &["H"]), ("I", &["I"]), ("J", &["J"]),
    ("K", &["K"]), ("L", &["L"]), ("M", &["M"]), ("N", &["N"]), ("O", &["O"]),
    ("P", &["P"]), ("Q", &["Q"]), ("R", &["R"]), ("S", &["S"]), ("T", &["T"]),
    ("U", &["U"]), ("V", &["V"]), ("W", &["W"]), ("X", &["X"]), ("Y", &["Y"]),
    ("Z", &["Z"]),
    // Digits & symbols
    ("1", &["1"]), ("2", &["2"]), ("3", &["3"]), ("4", &["4"]), ("5", &["5"]),
    ("6", &["6"]), ("7", &["7"]), ("8", &["8"]), ("9", &["9"]), ("0", &["0"]),
    ("-", &["-"]), (",", &[","]), (".", &["."]),
    // Vowels
    ("あ", &["A"]), ("い", &["I", "YI"]), ("う", &["U", "WU", "WHU"]), ("え", &["E"]), ("お", &["O"]),
    // K row
    ("か", &["KA", "CA"]), ("き", &["KI"]), ("く", &["KU", "CU", "QU"]), ("け", &["KE"]), ("こ", &["KO", "CO"]),
    // S row
    ("さ", &["SA"]), ("し", &["SI", "SHI", "CI"]), ("す", &["SU"]), ("せ", &["SE", "CE"]), ("そ", &["SO"]),
    // T row
    ("た", &["TA"]), ("ち", &["TI", "CHI"]), ("つ", &["TU", "TSU"]), ("て", &["TE"]), ("と", &["TO"]),
    // N row
    ("な", &["NA"]), ("に", &["NI"]), ("ぬ", &["NU"]), ("ね", &["NE"]), ("の", &["NO"]),
    ("ん", &["NN", "XN"]),
    // Marks
    ("ー", &["-"]), ("、", &[","]), ("。", &["."]),
];

/// Keys the matcher accepts into the input buffer.
pub fn is_typeable(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | ',')
}
