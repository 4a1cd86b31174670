//! Canned Content
//!
//! ARIA never reads what the user wrote: replies are drawn uniformly from a
//! fixed list.

use rand::{Rng, RngCore};

/// Persona display name
pub const PERSONA_NAME: &str = "ARIA";

/// Panel header title
pub const PERSONA_TITLE: &str = "ARIA AI";

/// Panel header subtitle
pub const PERSONA_SUBTITLE: &str = "Advanced Learning Assistant";

/// Shown in the empty input field
pub const INPUT_PLACEHOLDER: &str = "Ask ARIA anything about learning...";

/// Shown while a reply is pending
pub const TYPING_INDICATOR: &str = "ARIA is processing...";

/// First message of every freshly mounted widget
pub const GREETING: &str = "Hello! I'm ARIA, your advanced AI learning companion. I'm equipped with the latest educational algorithms to help you master any subject. What would you like to learn today? 🤖";

/// Replies, in selection order
pub const CANNED_RESPONSES: [&str; 8] = [
    "Excellent question! My neural networks are processing the optimal learning path for you. 🧠",
    "I love your curiosity! My algorithms detect high learning potential in this area. ⚡",
    "That's a sophisticated question! Let me access my knowledge database... 🎯",
    "Perfect timing for this question! My AI analysis suggests this is a key concept... 💎",
    "You're thinking like a true learner! My pattern recognition shows this connects to several principles... 🌟",
    "Brilliant question! My learning optimization protocols indicate this is where breakthroughs happen... 💡",
    "I can see you're ready for advanced concepts! Let me compile the best learning strategy... 🚀",
    "This is exactly what separates good learners from exceptional ones! Accessing premium content... 👑",
];

/// Quick-suggestion buttons under the transcript
pub const QUICK_SUGGESTIONS: [&str; 4] = [
    "Explain this concept simply",
    "Show me practical examples",
    "What should I learn next?",
    "Help me practice this skill",
];

/// Picks canned replies
#[derive(Clone, Debug)]
pub struct ResponseSelector {
    responses: &'static [&'static str],
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self {
            responses: &CANNED_RESPONSES,
        }
    }

    /// Pick a reply for `input`. The input is not inspected.
    pub fn select<R: RngCore>(&self, _input: &str, rng: &mut R) -> &'static str {
        let idx = rng.gen_range(0..self.responses.len());
        self.responses[idx]
    }

    /// Whether `text` is one of the canned replies
    pub fn is_canned(&self, text: &str) -> bool {
        self.responses.contains(&text)
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_selection_is_always_canned() {
        let selector = ResponseSelector::new();
        let mut rng = StdRng::seed_from_u64(7);
        for input in ["hi", "Explain this concept simply", "  ?  ", "ünïcödé"] {
            let reply = selector.select(input, &mut rng);
            assert!(selector.is_canned(reply), "unexpected reply: {reply}");
        }
    }

    #[test]
    fn test_every_reply_is_reachable() {
        let selector = ResponseSelector::new();
        let mut rng = StdRng::seed_from_u64(2024);
        let seen: HashSet<&str> = (0..500).map(|_| selector.select("q", &mut rng)).collect();
        assert_eq!(seen.len(), CANNED_RESPONSES.len());
    }

    #[test]
    fn test_input_content_is_ignored() {
        let selector = ResponseSelector::new();
        let a = selector.select("short", &mut StdRng::seed_from_u64(1));
        let b = selector.select("a much longer and different question", &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_content() {
        assert_eq!(CANNED_RESPONSES.len(), 8);
        assert_eq!(QUICK_SUGGESTIONS[0], "Explain this concept simply");
        assert!(GREETING.starts_with("Hello! I'm ARIA"));
    }
}
