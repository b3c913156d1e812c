use rand::rngs::ThreadRng;
use tokio::task::JoinHandle;

use crate::intervention::{Decision, FlowStep, InterventionFlow};
use crate::settings::SettingsState;
use crate::therapist::{self, Conversation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Settings,
    Therapist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // Therapist chat state
    pub conversation: Conversation,
    pub chat_input: String,
    pub chat_cursor: usize, // cursor position in chat_input, in chars
    pub composing: bool,
    pub reply_task: Option<JoinHandle<&'static str>>,
    pub chat_scroll: u16,
    pub chat_height: u16, // inner chat area size, updated during render
    pub chat_width: u16,

    // Settings state
    pub settings: SettingsState,

    // Interstitial overlay; None when no purchase is being intercepted
    pub intervention: Option<InterventionFlow>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    rng: ThreadRng,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,

            conversation: Conversation::opening(),
            chat_input: String::new(),
            chat_cursor: 0,
            composing: false,
            reply_task: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            settings: SettingsState::new(),

            intervention: None,

            animation_frame: 0,

            rng: rand::rng(),
        }
    }

    /// Whether the send affordance is live: non-blank input and no reply
    /// already pending.
    pub fn can_send(&self) -> bool {
        !self.chat_input.trim().is_empty() && !self.composing
    }

    /// Submits the chat input: appends the user message, clears the input,
    /// and schedules the delayed agent reply. Blank input is a no-op, as is
    /// submitting while a reply is pending.
    pub fn submit_chat(&mut self) {
        if !self.can_send() {
            return;
        }
        let text = self.chat_input.clone();
        if !self.conversation.push_user(&text) {
            return;
        }
        self.chat_input.clear();
        self.chat_cursor = 0;
        self.composing = true;

        // The response is picked up front; the task only owns the timer.
        let reply = therapist::pick_response(&mut self.rng);
        tracing::debug!("agent reply scheduled");
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(therapist::REPLY_DELAY).await;
            reply
        }));

        self.scroll_chat_to_bottom();
    }

    /// Collects the agent reply once its timer has fired. Called from the
    /// main loop after every event; ticks guarantee it runs at least every
    /// 300 ms.
    pub async fn poll_reply(&mut self) {
        if !self.reply_task.as_ref().is_some_and(|task| task.is_finished()) {
            return;
        }
        if let Some(task) = self.reply_task.take() {
            if let Ok(reply) = task.await {
                self.conversation.push_agent(reply);
                tracing::debug!("agent reply delivered");
            }
            self.composing = false;
            self.scroll_chat_to_bottom();
        }
    }

    /// Pre-fills the chat input with a quick-prompt text and puts the
    /// cursor at the end.
    pub fn prefill_chat(&mut self, text: &str) {
        self.chat_input = text.to_string();
        self.chat_cursor = self.chat_input.chars().count();
    }

    /// Opens the interstitial over the current screen, as if a checkout
    /// had just been intercepted. A flow already on screen stays.
    pub fn open_intervention(&mut self) {
        if self.intervention.is_none() {
            self.intervention = Some(InterventionFlow::begin(&mut self.rng));
        }
    }

    pub fn decide_intervention(&mut self, decision: Decision) {
        if let Some(flow) = self.intervention.as_mut() {
            flow.decide(decision);
        }
    }

    /// Closes the overlay, ending the flow. A consult-advisor result hands
    /// off to the Therapist screen.
    pub fn dismiss_intervention(&mut self) {
        if let Some(flow) = self.intervention.take() {
            if flow.step == FlowStep::Result && flow.decision == Some(Decision::Consult) {
                self.screen = Screen::Therapist;
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.composing {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll chat so the newest message (or the typing indicator) is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for message in self.conversation.messages() {
            total_lines += 1; // Role line ("You ·" or "Therapist ·")
            for line in message.text.lines() {
                // Character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.composing {
            total_lines += 2; // Role line + "Typing..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::therapist::{Role, CANNED_RESPONSES, REPLY_DELAY};

    #[tokio::test]
    async fn blank_submissions_change_nothing() {
        let mut app = App::new();
        let before = app.conversation.messages().len();

        app.chat_input = "   \t ".to_string();
        app.submit_chat();

        assert_eq!(app.conversation.messages().len(), before);
        assert!(app.reply_task.is_none());
        assert!(!app.composing);
        // The input is preserved, not swallowed.
        assert_eq!(app.chat_input, "   \t ");
    }

    #[tokio::test]
    async fn submitting_appends_user_message_and_schedules_reply() {
        let mut app = App::new();
        let before = app.conversation.messages().len();

        app.chat_input = "I keep adding things to my cart at midnight".to_string();
        app.submit_chat();

        let messages = app.conversation.messages();
        assert_eq!(messages.len(), before + 1);
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.text, "I keep adding things to my cart at midnight");
        assert!(app.composing);
        assert!(app.reply_task.is_some());
        assert!(app.chat_input.is_empty());
    }

    #[tokio::test]
    async fn send_affordance_gates_on_input_and_pending_reply() {
        let mut app = App::new();
        assert!(!app.can_send());

        app.chat_input = "  ".to_string();
        assert!(!app.can_send());

        app.chat_input = "hello".to_string();
        assert!(app.can_send());

        app.submit_chat();
        app.chat_input = "hello again".to_string();
        // Pending reply blocks a second submission.
        assert!(!app.can_send());
        let before = app.conversation.messages().len();
        app.submit_chat();
        assert_eq!(app.conversation.messages().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_the_fixed_delay() {
        let mut app = App::new();
        app.chat_input = "Why do I want another keyboard?".to_string();
        app.submit_chat();
        let before = app.conversation.messages().len();

        // Before the delay elapses the task is still pending.
        app.poll_reply().await;
        assert!(app.composing);
        assert_eq!(app.conversation.messages().len(), before);

        tokio::time::sleep(REPLY_DELAY).await;
        while app.reply_task.is_some() {
            app.poll_reply().await;
            tokio::task::yield_now().await;
        }

        let messages = app.conversation.messages();
        assert_eq!(messages.len(), before + 1);
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::Agent);
        assert!(CANNED_RESPONSES.contains(&last.text.as_str()));
        assert!(!app.composing);
    }

    #[tokio::test]
    async fn consult_result_hands_off_to_the_therapist_screen() {
        let mut app = App::new();
        app.open_intervention();
        app.decide_intervention(Decision::Consult);
        app.dismiss_intervention();
        assert!(app.intervention.is_none());
        assert_eq!(app.screen, Screen::Therapist);
    }

    #[tokio::test]
    async fn skip_result_stays_on_the_current_screen() {
        let mut app = App::new();
        app.open_intervention();
        app.decide_intervention(Decision::Skip);
        app.dismiss_intervention();
        assert!(app.intervention.is_none());
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[tokio::test]
    async fn dismissing_the_prompt_ends_the_flow_without_navigation() {
        let mut app = App::new();
        app.open_intervention();
        app.dismiss_intervention();
        assert!(app.intervention.is_none());
        assert_eq!(app.screen, Screen::Dashboard);
    }
}
