//! Spoken-number normalization
//!
//! Speech recognizers hand back numbers in many shapes: "five", "twenty-two",
//! "$100", "1,000", "555-0199", "3rd". Everything is collapsed to a bare digit
//! string so the tokenizer can treat it as an integer.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const UNITS: &[(&str, u32)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("too", 2),
    ("to", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("tin", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u32)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

static COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)[-\s](one|two|three|four|five|six|seven|eight|nine)\b",
    )
    .expect("compound number pattern is valid")
});

static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = UNITS
        .iter()
        .chain(TENS.iter())
        .map(|(word, _)| *word)
        .chain(std::iter::once("hundred"))
        .collect();
    Regex::new(&format!(r"(?i)\b({})\b", words.join("|"))).expect("number word pattern is valid")
});

static CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d)").expect("currency pattern is valid"));

static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d)").expect("thousands pattern is valid"));

static HYPHENATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)-(\d)").expect("hyphen pattern is valid"));

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)(st|nd|rd|th)\b").expect("ordinal pattern is valid"));

fn lookup(table: &[(&str, u32)], word: &str) -> Option<u32> {
    let lower = word.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, value)| *value)
}

/// Converts spoken and formatted numbers into digit strings
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberNormalizer;

impl NumberNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Apply every rewrite rule, in order, to `input`
    pub fn normalize(&self, input: &str) -> String {
        let text = COMPOUND.replace_all(input, |caps: &Captures| {
            let tens = lookup(TENS, &caps[1]).unwrap_or(0);
            let units = lookup(UNITS, &caps[2]).unwrap_or(0);
            (tens + units).to_string()
        });

        let text = SINGLE.replace_all(&text, |caps: &Captures| {
            let word = &caps[1];
            if word.eq_ignore_ascii_case("hundred") {
                return "100".to_string();
            }
            lookup(UNITS, word)
                .or_else(|| lookup(TENS, word))
                .map(|value| value.to_string())
                .unwrap_or_else(|| word.to_string())
        });

        let mut text = CURRENCY.replace_all(&text, "$1").into_owned();

        // "1,000,000": each pass only joins non-overlapping pairs
        while THOUSANDS.is_match(&text) {
            text = THOUSANDS.replace_all(&text, "$1$2").into_owned();
        }
        while HYPHENATED.is_match(&text) {
            text = HYPHENATED.replace_all(&text, "$1$2").into_owned();
        }

        ORDINAL.replace_all(&text, "$1").into_owned()
    }
}
