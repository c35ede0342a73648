//! Application state: views, settings form and the active session.

use crate::config::TuiConfig;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::Theme;
use dbchat_core::ConfigError;
use dbchat_db::DbConfig;
use dbchat_pipeline::ChatSession;

/// Which surface has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Settings,
    Chat,
}

/// Fields of the connection settings form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Host,
    Port,
    User,
    Password,
    Database,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Host,
            SettingsField::Port,
            SettingsField::User,
            SettingsField::Password,
            SettingsField::Database,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Host => "Host",
            SettingsField::Port => "Port",
            SettingsField::User => "User",
            SettingsField::Password => "Password",
            SettingsField::Database => "Database",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> SettingsField {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> SettingsField {
        let all = Self::all();
        let idx = self.index();
        all[if idx == 0 { all.len() - 1 } else { idx - 1 }]
    }
}

/// Editable connection settings.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub focus: SettingsField,
}

impl SettingsState {
    pub fn from_db_config(config: &DbConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port.to_string(),
            user: config.user.clone(),
            password: config.password.clone(),
            dbname: config.dbname.clone(),
            focus: SettingsField::Host,
        }
    }

    pub fn value(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Host => &self.host,
            SettingsField::Port => &self.port,
            SettingsField::User => &self.user,
            SettingsField::Password => &self.password,
            SettingsField::Database => &self.dbname,
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            SettingsField::Host => &mut self.host,
            SettingsField::Port => &mut self.port,
            SettingsField::User => &mut self.user,
            SettingsField::Password => &mut self.password,
            SettingsField::Database => &mut self.dbname,
        }
    }

    /// Build a database configuration from the form values.
    pub fn to_db_config(&self) -> Result<DbConfig, ConfigError> {
        let port: u16 = self
            .port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "port".to_string(),
                value: self.port.clone(),
                reason: "must be a number between 1 and 65535".to_string(),
            })?;

        Ok(DbConfig {
            host: self.host.trim().to_string(),
            port,
            user: self.user.trim().to_string(),
            password: self.password.clone(),
            dbname: self.dbname.trim().to_string(),
        })
    }
}

/// Retained notification history; only the newest entry is rendered.
const MAX_NOTIFICATIONS: usize = 32;

pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub view: View,
    pub settings: SettingsState,
    /// Chat input line being typed.
    pub input: String,
    /// The connected session; None until the connect action succeeds.
    pub session: Option<ChatSession>,
    pub notifications: Vec<Notification>,
    /// A question is in flight; input is disabled.
    pub busy: bool,
    /// Lines scrolled up from the bottom of the chat history.
    pub scroll: u16,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let settings = SettingsState::from_db_config(&config.initial_db_config());
        Self {
            config,
            theme: Theme::dark(),
            view: View::Settings,
            settings,
            input: String::new(),
            session: None,
            notifications: Vec::new(),
            busy: false,
            scroll: 0,
        }
    }

    pub fn connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        self.notifications.push(Notification::new(level, message));
    }

    /// Append a character to the chat input. Ignored while a question is in
    /// flight.
    pub fn input_char(&mut self, c: char) {
        if !self.busy {
            self.input.push(c);
        }
    }

    /// Delete the last character of the chat input. Ignored while a question
    /// is in flight.
    pub fn input_backspace(&mut self) {
        if !self.busy {
            self.input.pop();
        }
    }

    pub fn toggle_settings(&mut self) {
        self.view = match self.view {
            View::Settings if self.connected() => View::Chat,
            View::Settings => View::Settings,
            View::Chat => View::Settings,
        };
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SettingsState {
        SettingsState::from_db_config(&DbConfig::default())
    }

    #[test]
    fn test_field_cycle_wraps_both_ways() {
        let mut field = SettingsField::Host;
        for _ in 0..SettingsField::all().len() {
            field = field.next();
        }
        assert_eq!(field, SettingsField::Host);
        assert_eq!(SettingsField::Host.previous(), SettingsField::Database);
    }

    #[test]
    fn test_to_db_config_parses_port() {
        let mut form = settings();
        form.port = "5433".to_string();
        let config = form.to_db_config().unwrap();
        assert_eq!(config.port, 5433);
    }

    #[test]
    fn test_to_db_config_rejects_bad_port() {
        let mut form = settings();
        form.port = "not-a-port".to_string();
        assert!(form.to_db_config().is_err());
    }

    #[test]
    fn test_password_not_trimmed() {
        let mut form = settings();
        form.port = "5432".to_string();
        form.password = "  spaces matter  ".to_string();
        let config = form.to_db_config().unwrap();
        assert_eq!(config.password, "  spaces matter  ");
    }

    #[test]
    fn test_toggle_settings_requires_connection_for_chat() {
        let mut app = App::new(TuiConfig::default());
        assert_eq!(app.view, View::Settings);
        app.toggle_settings();
        // Not connected, so the settings view keeps focus.
        assert_eq!(app.view, View::Settings);
    }

    #[test]
    fn test_notification_history_is_capped() {
        let mut app = App::new(TuiConfig::default());
        for i in 0..100 {
            app.notify(NotificationLevel::Info, format!("note {}", i));
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        // Newest entry survives, oldest are dropped.
        assert_eq!(app.notifications.last().unwrap().message, "note 99");
        assert_eq!(app.notifications[0].message, "note 68");
    }

    #[test]
    fn test_input_editing_frozen_while_busy() {
        let mut app = App::new(TuiConfig::default());
        app.input_char('h');
        app.input_char('i');
        assert_eq!(app.input, "hi");

        app.busy = true;
        app.input_char('!');
        app.input_backspace();
        assert_eq!(app.input, "hi");

        app.busy = false;
        app.input_backspace();
        assert_eq!(app.input, "h");
    }
}
