//! Bounded conversation history and prompt rendering
//!
//! History is an append-only, oldest-first list of completed exchanges.
//! Rendering takes the trailing `window` turns plus the new user line and
//! flattens them into the fixed turn-delimited template:
//!
//! ```text
//! User: <u>
//! Assistant: <a>
//! User: <new>
//! Assistant:
//! ```

use std::fmt::Write as _;

/// One completed exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    user: String,
    assistant: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }
}

/// Oldest-first sequence of turns owned by one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Consume the history and return it with exactly one turn appended
    #[must_use]
    pub fn append(mut self, user: impl Into<String>, assistant: impl Into<String>) -> Self {
        self.turns.push(Turn::new(user, assistant));
        self
    }

    /// The trailing `size` turns, or all of them when shorter
    pub fn window(&self, size: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(size);
        &self.turns[start..]
    }

    /// Render the trailing `window` turns followed by the unanswered `new_turn`
    pub fn render(&self, new_turn: &str, window: usize) -> String {
        let mut prompt = String::new();
        for turn in self.window(window) {
            let _ = write!(prompt, "User: {}\nAssistant: {}\n", turn.user, turn.assistant);
        }
        let _ = write!(prompt, "User: {}\nAssistant:", new_turn);
        prompt
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> History {
        (0..n)
            .map(|i| Turn::new(format!("q{}", i), format!("a{}", i)))
            .collect()
    }

    #[test]
    fn test_render_single_turn_within_window() {
        let history = History::new().append("Hi", "Hello");
        assert_eq!(
            history.render("How are you?", 3),
            "User: Hi\nAssistant: Hello\nUser: How are you?\nAssistant:"
        );
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(History::new().render("Hi", 3), "User: Hi\nAssistant:");
    }

    #[test]
    fn test_window_zero_sends_no_context() {
        let history = history_of(4);
        assert!(history.window(0).is_empty());
        assert_eq!(history.render("next", 0), "User: next\nAssistant:");
    }

    #[test]
    fn test_window_uses_trailing_turns_in_order() {
        for len in 0..6 {
            let history = history_of(len);
            for size in 0..8 {
                let window = history.window(size);
                assert_eq!(window.len(), size.min(len));
                let expected: Vec<String> =
                    (len - window.len()..len).map(|i| format!("q{}", i)).collect();
                let actual: Vec<&str> = window.iter().map(Turn::user).collect();
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn test_render_drops_oldest_turns() {
        let history = history_of(5);
        assert_eq!(
            history.render("new", 2),
            "User: q3\nAssistant: a3\nUser: q4\nAssistant: a4\nUser: new\nAssistant:"
        );
    }

    #[test]
    fn test_render_is_pure() {
        let history = history_of(3);
        assert_eq!(history.render("x", 2), history.render("x", 2));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_render_keeps_repeated_user_text() {
        let history = History::new().append("same", "one").append("same", "two");
        assert_eq!(
            history.render("same", 5),
            "User: same\nAssistant: one\nUser: same\nAssistant: two\nUser: same\nAssistant:"
        );
    }

    #[test]
    fn test_append_adds_exactly_one_turn_at_end() {
        let history = history_of(2);
        let before = history.len();
        let history = history.append("u", "a");
        assert_eq!(history.len(), before + 1);
        assert_eq!(history.last(), Some(&Turn::new("u", "a")));
        assert_eq!(history.turns()[0].user(), "q0");
    }
}
