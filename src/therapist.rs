//! The simulated shopping-therapist conversation: an append-only message
//! log plus a canned-response picker. The reply delay itself lives in the
//! app, which spawns and polls the timer task.

use chrono::{DateTime, Duration, Local};
use rand::Rng;

/// How long the "therapist" pretends to type before replying.
pub const REPLY_DELAY: std::time::Duration = std::time::Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

pub const CANNED_RESPONSES: [&str; 4] = [
    "That's totally normal! Boredom shopping is like emotional eating but for your wallet. What usually helps you feel more engaged?",
    "I love your self-awareness! 🌟 That pause you took before buying shows you're building great habits. How are you feeling about that choice now?",
    "Sounds like you were looking for some excitement. Have you considered that the thrill might come from the hunt, not the purchase? What else gives you that same energy?",
    "You're getting so good at catching these patterns! The fact that you noticed the emotion behind the urge is huge progress. 💪",
];

/// Quick conversation starters shown under the chat: (label, text that
/// pre-fills the input).
pub const QUICK_PROMPTS: [(&str, &str); 3] = [
    ("Emotional Check-in", "How are you feeling right now?"),
    ("Gratitude Practice", "What are you grateful for today?"),
    ("Shopping Triggers", "Let's explore your spending patterns"),
];

const OPENING_EXCHANGE: [(Role, &str); 3] = [
    (
        Role::Agent,
        "Hey there! I'm your AI shopping therapist. I noticed you almost bought those headphones earlier. Want to talk about what was going through your mind?",
    ),
    (
        Role::User,
        "I was feeling pretty bored and saw an ad for them. They looked really cool.",
    ),
    (
        Role::Agent,
        "Ah, the classic boredom-to-shopping pipeline! 😄 I get it - when we're understimulated, our brains love the dopamine hit of 'new shiny thing.' But you already have 3 pairs of headphones, right? What do you think was really missing in that moment?",
    ),
];

/// Append-only, ordered message log. Ids increase strictly; nothing is
/// ever removed or reordered.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    /// A log seeded with the fixed opening exchange, backdated so the
    /// history reads like an ongoing session.
    pub fn opening() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        let now = Local::now();
        for (i, (role, text)) in OPENING_EXCHANGE.iter().enumerate() {
            let backdate = Duration::minutes(5 - i as i64);
            conversation.append(*role, text, now - backdate);
        }
        conversation
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    fn append(&mut self, role: Role, text: &str, sent_at: DateTime<Local>) {
        self.messages.push(Message {
            id: self.next_id,
            role,
            text: text.to_string(),
            sent_at,
        });
        self.next_id += 1;
    }

    /// Appends a user message, trimmed. Whitespace-only input is a silent
    /// no-op; returns whether anything was appended.
    pub fn push_user(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.append(Role::User, trimmed, Local::now());
        true
    }

    pub fn push_agent(&mut self, text: &str) {
        self.append(Role::Agent, text, Local::now());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Picks one canned response uniformly at random.
pub fn pick_response(rng: &mut impl Rng) -> &'static str {
    CANNED_RESPONSES[rng.random_range(0..CANNED_RESPONSES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn opening_exchange_is_seeded_in_order() {
        let conversation = Conversation::opening();
        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::Agent);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Agent);
        assert!(messages[0].sent_at < messages[1].sent_at);
        assert!(messages[1].sent_at < messages[2].sent_at);
    }

    #[test]
    fn whitespace_only_input_is_ignored() {
        let mut conversation = Conversation::empty();
        assert!(!conversation.push_user(""));
        assert!(!conversation.push_user("   \t\n"));
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn user_messages_are_trimmed() {
        let mut conversation = Conversation::empty();
        assert!(conversation.push_user("  I almost bought a lamp  "));
        assert_eq!(conversation.messages()[0].text, "I almost bought a lamp");
        assert_eq!(conversation.messages()[0].role, Role::User);
    }

    #[test]
    fn ids_increase_strictly() {
        let mut conversation = Conversation::opening();
        conversation.push_user("hello");
        conversation.push_agent("hi");
        let ids: Vec<u64> = conversation.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn picked_responses_come_from_the_canned_set() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let response = pick_response(&mut rng);
            assert!(CANNED_RESPONSES.contains(&response));
        }
    }
}
