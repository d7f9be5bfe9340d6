//! Built-in campaign
//!
//! Three levels described as tile grids (see `sim::level` for the legend).
//! The first row of each grid sets the world width; later rows may be
//! ragged, missing cells are empty.

/// Number of levels in the built-in campaign
pub const LEVEL_COUNT: usize = 3;

const LEVEL_1: [&str; 8] = [
    "                                                                ",
    "",
    "                                           C",
    "         C                    C",
    "     C        E        C                             C        F",
    "  XXXXXXXXXXXXXXXX        XXXXXX      XXXXXX       XXXXXXXXXXXX",
    "",
    "=====ttttttttttttttttttttttttttttttttttttttttttttttttttttttttttt",
];

const LEVEL_2: [&str; 8] = [
    "                                                                ",
    "",
    "            C         C",
    "       M          E                  C        E",
    "    XXXXXXXX    XXXXXXXXXX      XXXXXXXX        C        F",
    "                                             XXXXXX   XXXXXXX",
    "   C                C                   C",
    "=====tttttttttttttttt    tttttttttttttttttttttttttttttttttttttt",
];

const LEVEL_3: [&str; 8] = [
    "                                                                ",
    "",
    "                  C          E",
    "       M        XXXX       XXXXX       C              C",
    "   C            X  X          E        XXX     C     XXX      F",
    "XXXXXXXXXXXX    X  X    C         C          XXX         XXXXXX",
    "",
    "=====ttttttttttttttttttttttttt    tttttttttttttttttttttttttttttt",
];

/// The campaign as owned rows, in play order.
pub fn builtin() -> Vec<Vec<String>> {
    [&LEVEL_1[..], &LEVEL_2[..], &LEVEL_3[..]]
        .iter()
        .map(|rows| rows.iter().map(|row| (*row).to_string()).collect())
        .collect()
}
