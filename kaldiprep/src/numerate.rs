//! Number-word encoding for prompts.
//!
//! Prompts arrive as comma-separated number words (`"three, two, four, four"`).
//! [`encode`] turns them into the digit/underscore form used for file names and
//! utterance identifiers (`"3_2_4_4"`), [`display_format`] into the space-separated
//! words written to transcripts (`"three two four four"`).

/// Ordered substitution table applied by [`encode`].
///
/// Each entry replaces every occurrence of its key before the next entry runs.
/// The separator entries must stay last so that digits are produced before
/// `", "` and any remaining spaces collapse to underscores.
pub const DIGIT_WORDS: [(&str, &str); 13] = [
    ("oh", "0"),
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    (", ", "_"),
    (" ", "_"),
];

/// Encode a prompt into digits and underscores.
///
/// Substitution is literal and unconditional: a key matching inside a longer
/// token is replaced too. Existing data sets were generated this way, so the
/// behavior is kept as-is.
pub fn encode(text: &str) -> String {
    DIGIT_WORDS
        .iter()
        .fold(text.to_string(), |acc, (word, digit)| acc.replace(word, digit))
}

/// Format a prompt for human-readable transcripts: `", "` becomes a single space.
pub fn display_format(text: &str) -> String {
    text.replace(", ", " ")
}
