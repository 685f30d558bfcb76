/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep at most `limit` words.
///
/// Text already within the limit is returned unchanged; over-long text is
/// cut to its first `limit` words joined by single spaces. Never pads.
pub fn enforce_word_limit(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > limit {
        words[..limit].join(" ")
    } else {
        text.to_string()
    }
}

/// Keep strictly fewer than `ceiling` words.
pub fn enforce_word_ceiling(text: &str, ceiling: usize) -> String {
    enforce_word_limit(text, ceiling.saturating_sub(1))
}
