use dbchat_core::TurnRole;
use dbchat_tui::config::{LlmConfig, TuiConfig};
use dbchat_tui::keys::{map_key, Action};
use dbchat_tui::state::{App, SettingsField, SettingsState, View};
use dbchat_tui::theme::{turn_role_color, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use std::io::Write;

fn base_config() -> TuiConfig {
    TuiConfig::default()
}

fn form() -> SettingsState {
    SettingsState::from_db_config(&dbchat_db::DbConfig::default())
}

#[test]
fn config_defaults_validate() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_rejects_empty_model() {
    let mut config = base_config();
    config.llm = LlmConfig {
        api_key: None,
        model: "  ".to_string(),
        requests_per_minute: 60,
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_zero_rate_limit() {
    let mut config = base_config();
    config.llm.requests_per_minute = 0;
    assert!(config.validate().is_err());
}

#[test]
fn config_parses_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[llm]\napi_key = \"k\"\nmodel = \"mixtral-8x7b-32768\"\n\n[database]\nhost = \"db.internal\"\nport = 5433"
    )
    .unwrap();
    let config = TuiConfig::from_path(file.path()).unwrap();
    assert_eq!(config.llm.api_key.as_deref(), Some("k"));
    let db = config.initial_db_config();
    assert_eq!(db.host, "db.internal");
    assert_eq!(db.port, 5433);
}

#[test]
fn config_rejects_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[llm]\nmodle = \"typo\"").unwrap();
    assert!(TuiConfig::from_path(file.path()).is_err());
}

#[test]
fn unconnected_app_stays_in_settings() {
    let mut app = App::new(base_config());
    assert_eq!(app.view, View::Settings);
    app.toggle_settings();
    assert_eq!(app.view, View::Settings);
}

proptest! {
    #[test]
    fn printable_chars_insert(c in proptest::char::range('a', 'z')) {
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        let action = map_key(View::Chat, event);
        prop_assert_eq!(action, Some(Action::Insert(c)));
    }

    #[test]
    fn ctrl_c_always_quits(view_idx in 0usize..2) {
        let view = [View::Settings, View::Chat][view_idx];
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        prop_assert_eq!(map_key(view, event), Some(Action::Quit));
    }

    #[test]
    fn enter_always_submits(view_idx in 0usize..2) {
        let view = [View::Settings, View::Chat][view_idx];
        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        prop_assert_eq!(map_key(view, event), Some(Action::Submit));
    }

    #[test]
    fn arrows_are_modal(down in prop::bool::ANY) {
        let code = if down { KeyCode::Down } else { KeyCode::Up };
        let event = KeyEvent::new(code, KeyModifiers::NONE);
        let settings_action = map_key(View::Settings, event);
        let chat_action = map_key(View::Chat, event);
        if down {
            prop_assert_eq!(settings_action, Some(Action::NextField));
            prop_assert_eq!(chat_action, Some(Action::ScrollDown));
        } else {
            prop_assert_eq!(settings_action, Some(Action::PrevField));
            prop_assert_eq!(chat_action, Some(Action::ScrollUp));
        }
    }

    #[test]
    fn field_cycle_is_a_permutation(steps in 0usize..20) {
        let mut field = SettingsField::Host;
        for _ in 0..steps {
            field = field.next();
        }
        for _ in 0..steps {
            field = field.previous();
        }
        prop_assert_eq!(field, SettingsField::Host);
    }

    #[test]
    fn port_round_trips_through_form(port in 1u16..=u16::MAX) {
        let mut settings = form();
        settings.port = port.to_string();
        let config = settings.to_db_config().unwrap();
        prop_assert_eq!(config.port, port);
    }

    #[test]
    fn garbage_port_is_rejected(port in "[a-z ]{1,8}") {
        let mut settings = form();
        settings.port = port;
        prop_assert!(settings.to_db_config().is_err());
    }

    #[test]
    fn password_preserved_verbatim(password in "\\PC{0,32}") {
        let mut settings = form();
        settings.password = password.clone();
        let config = settings.to_db_config().unwrap();
        prop_assert_eq!(config.password, password);
    }
}

#[test]
fn turn_role_colors_distinct() -> Result<(), proptest::test_runner::TestCaseError> {
    let theme = Theme::dark();
    prop_assert_eq!(turn_role_color(TurnRole::Human, &theme), theme.primary);
    prop_assert_eq!(turn_role_color(TurnRole::Ai, &theme), theme.secondary);
    prop_assert_ne!(theme.primary, theme.secondary);
    Ok(())
}
