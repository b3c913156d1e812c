use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode, Screen};
use crate::intervention::{Decision, FlowStep};
use crate::therapist::QUICK_PROMPTS;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit that works in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // The interstitial swallows all input while it is on screen.
    if app.intervention.is_some() {
        handle_intervention_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_intervention_key(app: &mut App, key: KeyEvent) {
    let Some(step) = app.intervention.as_ref().map(|flow| flow.step) else {
        return;
    };
    match step {
        FlowStep::Prompt => match key.code {
            KeyCode::Char('s') => app.decide_intervention(Decision::Skip),
            KeyCode::Char('t') => app.decide_intervention(Decision::Consult),
            KeyCode::Char('b') => app.decide_intervention(Decision::Proceed),
            // Dismissal at any step ends the flow entirely.
            KeyCode::Esc => app.dismiss_intervention(),
            _ => {}
        },
        FlowStep::Result => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.dismiss_intervention(),
            _ => {}
        },
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Global keys first: quit, screen switching, the interstitial trigger.
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('1') => {
            app.screen = Screen::Dashboard;
            return;
        }
        KeyCode::Char('2') => {
            app.screen = Screen::Settings;
            return;
        }
        KeyCode::Char('3') => {
            app.screen = Screen::Therapist;
            return;
        }
        // Simulate an intercepted checkout
        KeyCode::Char('p') => {
            app.open_intervention();
            return;
        }
        _ => {}
    }

    match app.screen {
        Screen::Dashboard => {}
        Screen::Settings => handle_settings_normal(app, key),
        Screen::Therapist => handle_therapist_normal(app, key),
    }
}

fn handle_settings_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.settings.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.settings.nav_up(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.settings.activate() {
                app.input_mode = InputMode::Editing;
            }
        }
        _ => {}
    }
}

fn handle_therapist_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            app.chat_cursor = app.chat_input.chars().count();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.chat_scroll = app.chat_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.chat_scroll = app.chat_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => app.chat_scroll = 0,
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        // Quick prompts pre-fill the input and start typing.
        KeyCode::Char('c') => start_quick_prompt(app, 0),
        KeyCode::Char('r') => start_quick_prompt(app, 1),
        KeyCode::Char('x') => start_quick_prompt(app, 2),
        _ => {}
    }
}

fn start_quick_prompt(app: &mut App, index: usize) {
    if let Some((_, text)) = QUICK_PROMPTS.get(index) {
        app.prefill_chat(text);
        app.input_mode = InputMode::Editing;
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Therapist => handle_chat_editing(app, key),
        Screen::Settings => handle_settings_editing(app, key),
        Screen::Dashboard => app.input_mode = InputMode::Normal,
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // No-op while blank or while a reply is pending; the input
            // stays focused either way.
            app.submit_chat();
        }
        _ => edit_text(&mut app.chat_input, &mut app.chat_cursor, key),
    }
}

fn handle_settings_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.settings.cancel_edit();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.settings.commit_edit();
            app.input_mode = InputMode::Normal;
        }
        _ => {
            let (buffer, cursor) = app.settings.edit_parts();
            edit_text(buffer, cursor, key);
        }
    }
}

/// Cursor-aware line editing shared by the chat input and the settings
/// edit popup. The cursor is a character index.
fn edit_text(text: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = char_to_byte_index(text, *cursor);
                text.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = text.chars().count();
            if *cursor < char_count {
                let byte_pos = char_to_byte_index(text, *cursor);
                text.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = text.chars().count();
            *cursor = (*cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = text.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(text, *cursor);
            text.insert(byte_pos, c);
            *cursor += 1;
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => match app.screen {
            Screen::Therapist => {
                app.chat_scroll = app.chat_scroll.saturating_add(3);
            }
            Screen::Settings => app.settings.nav_down(),
            Screen::Dashboard => {}
        },
        MouseEventKind::ScrollUp => match app.screen {
            Screen::Therapist => {
                app.chat_scroll = app.chat_scroll.saturating_sub(3);
            }
            Screen::Settings => app.settings.nav_up(),
            Screen::Dashboard => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn interstitial_keys_drive_the_flow_to_result() {
        let mut app = App::new();
        app.open_intervention();
        handle_key(&mut app, press(KeyCode::Char('s')));
        let flow = app.intervention.as_ref().unwrap();
        assert_eq!(flow.step, FlowStep::Result);
        assert_eq!(flow.decision, Some(Decision::Skip));

        // Screen switching is swallowed while the overlay is up.
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Dashboard);

        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.intervention.is_none());
    }

    #[test]
    fn escape_dismisses_the_prompt_step() {
        let mut app = App::new();
        app.open_intervention();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.intervention.is_none());
    }

    #[test]
    fn digits_switch_screens_in_normal_mode() {
        let mut app = App::new();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.screen, Screen::Therapist);
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Settings);
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[tokio::test]
    async fn chat_editing_inserts_at_the_cursor() {
        let mut app = App::new();
        app.screen = Screen::Therapist;
        handle_key(&mut app, press(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "lamp".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Home));
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(app.chat_input, "a lamp");

        handle_key(&mut app, press(KeyCode::End));
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.chat_input, "a lam");
    }

    #[test]
    fn settings_activation_opens_the_edit_popup_for_text_rows() {
        let mut app = App::new();
        app.screen = Screen::Settings;
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.settings.editing);

        handle_key(&mut app, press(KeyCode::Char('0')));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.settings.rows()[0].value,
            SettingValue::Text("5000".to_string())
        );
    }

    #[tokio::test]
    async fn quick_prompts_prefill_the_chat_input() {
        let mut app = App::new();
        app.screen = Screen::Therapist;
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.chat_input, "What are you grateful for today?");
        assert_eq!(app.input_mode, InputMode::Editing);
    }
}
