//! In-memory settings table. Values are echoed, never validated, and
//! never persisted; they live exactly as long as the process.

use ratatui::widgets::ListState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Free text, echoed as typed.
    Text(String),
    /// Index into the row's `options`.
    Choice(usize),
    Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub section: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Currency prefix shown before free-text values.
    pub prefix: Option<&'static str>,
    /// Non-empty only for `Choice` rows.
    pub options: &'static [&'static str],
    pub value: SettingValue,
}

impl Setting {
    /// Human-readable current value, prefix included.
    pub fn display_value(&self) -> String {
        match &self.value {
            SettingValue::Text(text) => {
                format!("{}{}", self.prefix.unwrap_or(""), text)
            }
            SettingValue::Choice(i) => self.options.get(*i).copied().unwrap_or("").to_string(),
            SettingValue::Toggle(true) => "On".to_string(),
            SettingValue::Toggle(false) => "Off".to_string(),
        }
    }
}

pub const PERSONALITY_OPTIONS: &[&str] = &[
    "Witty & Sarcastic",
    "Gentle & Supportive",
    "Strict & Direct",
    "Funny & Lighthearted",
];

/// Selection, values, and the edit-popup buffer for the settings screen.
#[derive(Debug)]
pub struct SettingsState {
    rows: Vec<Setting>,
    pub state: ListState,
    pub editing: bool,
    pub edit_buffer: String,
    pub edit_cursor: usize,
}

impl SettingsState {
    pub fn new() -> Self {
        let rows = vec![
            Setting {
                section: "Personal Settings",
                label: "Hourly Wage",
                description: "Used to calculate \"hours of work\" for purchases",
                prefix: Some("₹"),
                options: &[],
                value: SettingValue::Text("500".to_string()),
            },
            Setting {
                section: "Personal Settings",
                label: "AI Personality",
                description: "How your AI therapist should speak to you",
                prefix: None,
                options: PERSONALITY_OPTIONS,
                value: SettingValue::Choice(0),
            },
            Setting {
                section: "Intervention Settings",
                label: "Strict Mode",
                description: "Makes it harder to bypass AI prompts",
                prefix: None,
                options: &[],
                value: SettingValue::Toggle(false),
            },
            Setting {
                section: "Intervention Settings",
                label: "Enable Notifications",
                description: "Get reminded about your savings goals",
                prefix: None,
                options: &[],
                value: SettingValue::Toggle(true),
            },
        ];

        let mut state = ListState::default();
        state.select(Some(0));

        Self {
            rows,
            state,
            editing: false,
            edit_buffer: String::new(),
            edit_cursor: 0,
        }
    }

    pub fn rows(&self) -> &[Setting] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&Setting> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn nav_down(&mut self) {
        let len = self.rows.len();
        if len > 0 {
            let i = self.state.selected().unwrap_or(0);
            self.state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn nav_up(&mut self) {
        let i = self.state.selected().unwrap_or(0);
        self.state.select(Some(i.saturating_sub(1)));
    }

    /// Activates the selected row: flips a toggle, cycles a choice (wrapping
    /// past the last option), or opens the edit popup for free text.
    /// Returns whether editing began.
    pub fn activate(&mut self) -> bool {
        let Some(i) = self.state.selected() else {
            return false;
        };
        let Some(row) = self.rows.get_mut(i) else {
            return false;
        };
        match &mut row.value {
            SettingValue::Toggle(on) => {
                *on = !*on;
                false
            }
            SettingValue::Choice(choice) => {
                *choice = (*choice + 1) % row.options.len().max(1);
                false
            }
            SettingValue::Text(text) => {
                self.edit_buffer = text.clone();
                self.edit_cursor = self.edit_buffer.chars().count();
                self.editing = true;
                true
            }
        }
    }

    /// Writes the edit buffer back to the selected row and closes the popup.
    pub fn commit_edit(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(row) = self.rows.get_mut(i) {
                if let SettingValue::Text(text) = &mut row.value {
                    *text = self.edit_buffer.clone();
                }
            }
        }
        self.editing = false;
    }

    /// Closes the popup, discarding the buffer.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Buffer and cursor for the edit popup, borrowed together so the
    /// handler's text-editing helper can drive both.
    pub fn edit_parts(&mut self) -> (&mut String, &mut usize) {
        (&mut self.edit_buffer, &mut self.edit_cursor)
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_product() {
        let settings = SettingsState::new();
        let rows = settings.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].value, SettingValue::Text("500".to_string()));
        assert_eq!(rows[1].value, SettingValue::Choice(0));
        assert_eq!(rows[2].value, SettingValue::Toggle(false));
        assert_eq!(rows[3].value, SettingValue::Toggle(true));
    }

    #[test]
    fn activating_a_toggle_flips_it() {
        let mut settings = SettingsState::new();
        settings.state.select(Some(2));
        assert!(!settings.activate());
        assert_eq!(settings.rows()[2].value, SettingValue::Toggle(true));
        settings.activate();
        assert_eq!(settings.rows()[2].value, SettingValue::Toggle(false));
    }

    #[test]
    fn cycling_a_choice_wraps_past_the_last_option() {
        let mut settings = SettingsState::new();
        settings.state.select(Some(1));
        for expected in [1, 2, 3, 0] {
            settings.activate();
            assert_eq!(settings.rows()[1].value, SettingValue::Choice(expected));
        }
    }

    #[test]
    fn text_editing_echoes_the_buffer() {
        let mut settings = SettingsState::new();
        settings.state.select(Some(0));
        assert!(settings.activate());
        assert!(settings.editing);
        assert_eq!(settings.edit_buffer, "500");

        settings.edit_buffer = "  750 ".to_string();
        settings.commit_edit();
        assert!(!settings.editing);
        // Echoed exactly as typed, no validation or trimming.
        assert_eq!(
            settings.rows()[0].value,
            SettingValue::Text("  750 ".to_string())
        );
        assert_eq!(settings.rows()[0].display_value(), "₹  750 ");
    }

    #[test]
    fn cancel_discards_the_buffer() {
        let mut settings = SettingsState::new();
        settings.state.select(Some(0));
        settings.activate();
        settings.edit_buffer = "900".to_string();
        settings.cancel_edit();
        assert_eq!(settings.rows()[0].value, SettingValue::Text("500".to_string()));
    }

    #[test]
    fn display_values_render_kind_specifically() {
        let settings = SettingsState::new();
        assert_eq!(settings.rows()[0].display_value(), "₹500");
        assert_eq!(settings.rows()[1].display_value(), "Witty & Sarcastic");
        assert_eq!(settings.rows()[2].display_value(), "Off");
        assert_eq!(settings.rows()[3].display_value(), "On");
    }
}
