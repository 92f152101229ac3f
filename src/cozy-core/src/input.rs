//! Normalization of user-typed text before it is shown and sent.

use thiserror::Error;

/// Longest message accepted, in characters. Longer input is truncated.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Input that cannot be sent at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing but whitespace was typed.
    #[error("Please enter a message")]
    Empty,
}

/// Text ready to be displayed and transmitted. Computed once per send so the
/// transcript and the request always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput {
    pub text: String,
    /// Whether characters past [`MAX_MESSAGE_CHARS`] were dropped.
    pub truncated: bool,
}

/// Validate and truncate raw input.
///
/// Surrounding whitespace is dropped first, so what gets measured, shown and
/// sent is the same text. Nothing left means [`InputError::Empty`]; otherwise
/// the text is cut to the first [`MAX_MESSAGE_CHARS`] characters.
pub fn prepare_input(raw: &str) -> Result<PreparedInput, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    match text.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => Ok(PreparedInput {
            text: text[..cut].to_string(),
            truncated: true,
        }),
        None => Ok(PreparedInput {
            text: text.to_string(),
            truncated: false,
        }),
    }
}
