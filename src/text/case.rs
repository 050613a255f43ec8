//! Phrase casing transforms used by the dictation commands

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "hello big world" -> "helloBigWorld"
pub fn camel_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect()
}

/// "hello big world" -> "HelloBigWorld"
pub fn pascal_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| capitalize(&word.to_lowercase()))
        .collect()
}

/// "Hello Big World" -> "hello_big_world"
pub fn snake_case(phrase: &str) -> String {
    join_lower(phrase, "_")
}

/// "Hello Big World" -> "hello-big-world"
pub fn kebab_case(phrase: &str) -> String {
    join_lower(phrase, "-")
}

fn join_lower(phrase: &str, separator: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Capitalize the first letter and close with `terminator` and a trailing space.
///
/// Returns `None` for an empty phrase so nothing gets typed.
pub fn sentence(phrase: &str, terminator: char) -> Option<String> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    Some(format!("{}{} ", capitalize(phrase), terminator))
}
