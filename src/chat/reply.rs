use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

struct Intent {
    pattern: Regex,
    reply: &'static str,
}

/// Checked top to bottom; the first match wins.
static INTENTS: LazyLock<Vec<Intent>> = LazyLock::new(|| {
    [
        ("hello|hi|hey", "Hey! Kem che? 😊"),
        ("thank|thx|thanks", "You're welcome!"),
        ("how are you", "I am good! Tamne kem cho?"),
        ("ok|okay", "Perfect! Chalo fine che"),
        ("bye|goodnight|gn", "Bye! Have a great day 🙌"),
    ]
    .into_iter()
    .map(|(pattern, reply)| Intent {
        pattern: Regex::new(pattern).expect("intent patterns are valid regexes"),
        reply,
    })
    .collect()
});

pub fn default_fillers() -> Vec<String> {
    [
        "Hmm, interesting! Tell me more.",
        "Sachu? That's nice!",
        "Haha, I get it 😄",
        "Let me think about that...",
        "Oh really? Pachi shu thayu?",
        "Sounds good to me!",
        "I'll get back to you on that.",
        "Nice! 👍",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Picks the bot's answer to a user message.
///
/// Remembers the last filler it handed out so the same filler is never used
/// twice in a row.
#[derive(Debug)]
pub struct ReplySelector {
    fillers: Vec<String>,
    last_filler: Option<usize>,
    rng: StdRng,
}

impl ReplySelector {
    pub fn new(fillers: Vec<String>) -> Self {
        Self::with_rng(fillers, StdRng::from_entropy())
    }

    pub fn with_seed(fillers: Vec<String>, seed: u64) -> Self {
        Self::with_rng(fillers, StdRng::seed_from_u64(seed))
    }

    fn with_rng(fillers: Vec<String>, rng: StdRng) -> Self {
        let fillers = if fillers.is_empty() {
            log::warn!("Empty filler pool, falling back to built-in replies");
            default_fillers()
        } else {
            fillers
        };
        Self {
            fillers,
            last_filler: None,
            rng,
        }
    }

    #[cfg(test)]
    pub fn fillers(&self) -> &[String] {
        &self.fillers
    }

    pub fn select_reply(&mut self, user_text: &str) -> String {
        let normalized = user_text.to_lowercase();
        if let Some(intent) = INTENTS.iter().find(|i| i.pattern.is_match(&normalized)) {
            return intent.reply.to_string();
        }
        self.next_filler()
    }

    fn next_filler(&mut self) -> String {
        let pool = self.fillers.len();
        let mut index = self.rng.gen_range(0..pool);
        while pool > 1 && Some(index) == self.last_filler {
            index = self.rng.gen_range(0..pool);
        }
        self.last_filler = Some(index);
        self.fillers[index].clone()
    }
}
