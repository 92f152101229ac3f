//! The ordered list of messages shown to the user.

use crate::message::Message;

/// Messages in display order. The first entry is always the welcome message.
///
/// Entries are only ever appended, or inserted directly after the welcome
/// message when history arrives; nothing is re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// A transcript holding only a fresh welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::welcome()],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Place server history right after the welcome message.
    ///
    /// Anything appended since the transcript was created stays after the
    /// history, so a late history response never hides newer messages.
    pub fn hydrate(&mut self, history: Vec<Message>) {
        let tail = self.messages.split_off(1);
        self.messages.extend(history);
        self.messages.extend(tail);
    }

    /// Drop everything and start over with a fresh welcome message.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::welcome());
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::WELCOME_ID;

    fn contents(transcript: &Transcript) -> Vec<&str> {
        transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect()
    }

    #[test]
    fn test_starts_with_welcome() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].id, WELCOME_ID);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("one"));
        transcript.push(Message::agent_reply("two"));
        assert_eq!(contents(&transcript)[1..], ["one", "two"]);
    }

    #[test]
    fn test_hydrate_inserts_after_welcome() {
        let mut transcript = Transcript::new();
        transcript.hydrate(vec![
            Message::user("old question"),
            Message::agent_reply("old answer"),
        ]);
        assert_eq!(transcript.messages().len(), 3);
        assert_eq!(transcript.messages()[0].id, WELCOME_ID);
        assert_eq!(contents(&transcript)[1..], ["old question", "old answer"]);
    }

    #[test]
    fn test_hydrate_keeps_newer_messages_last() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("typed before history arrived"));
        transcript.hydrate(vec![Message::agent_reply("from history")]);
        assert_eq!(
            contents(&transcript)[1..],
            ["from history", "typed before history arrived"]
        );
    }

    #[test]
    fn test_reset_refreshes_welcome() {
        let mut transcript = Transcript::new();
        let first_welcome = transcript.messages()[0].timestamp;
        transcript.push(Message::user("hello"));

        std::thread::sleep(std::time::Duration::from_millis(2));
        transcript.reset();

        assert_eq!(transcript.messages().len(), 1);
        assert!(transcript.messages()[0].is_welcome());
        assert!(transcript.messages()[0].timestamp > first_welcome);
    }
}
