//! Built-in boards.

use crate::board::BoardConfig;

/// Classic 100-square Chutes and Ladders with a six-sided spinner.
#[must_use]
pub fn chutes_and_ladders() -> BoardConfig {
    BoardConfig::new(
        "Chutes and Ladders",
        100,
        6,
        [
            (2, 19),
            (4, 14),
            (8, 31),
            (16, 6),
            (21, 42),
            (28, 84),
            (36, 44),
            (48, 26),
            (49, 10),
            (51, 67),
            (56, 53),
            (62, 18),
            (64, 60),
            (71, 91),
            (80, 100),
            (87, 24),
            (93, 73),
            (95, 75),
            (98, 78),
        ],
    )
}

/// Curious George Chocolate Trail: 11 squares, moves of 1 or 2.
#[must_use]
pub fn curious_george() -> BoardConfig {
    BoardConfig::new(
        "Curious George Chocolate Trail",
        11,
        2,
        [(1, 2), (3, 2), (4, 7), (6, 0), (8, 11), (9, 7)],
    )
}

/// All built-in boards.
#[must_use]
pub fn all() -> Vec<BoardConfig> {
    vec![chutes_and_ladders(), curious_george()]
}

/// Lower-case, dash-separated form of a board name.
///
/// `"Chutes and Ladders"` becomes `"chutes-and-ladders"`.
#[must_use]
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Find a built-in board by full name or slug, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<BoardConfig> {
    let wanted = slug(name);
    all().into_iter().find(|config| {
        let own = slug(&config.name);
        own == wanted || own.starts_with(&format!("{wanted}-"))
    })
}
