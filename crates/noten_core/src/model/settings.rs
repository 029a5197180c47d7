//! User preference document (`settings.json`).
//!
//! Plain data; no business rules. Every field carries its own serde default
//! so partial or older files still load.

use super::wire::EnumToken;
use serde::{Deserialize, Deserializer, Serialize};

/// Requested color scheme. Decodes from a name or a variant index; unknown
/// tokens fall back to `System`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeMode {
    /// Follow the OS preference.
    #[default]
    System,
    Light,
    Dark,
}

impl<'de> Deserialize<'de> for ThemeMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = EnumToken::deserialize(deserializer)?;
        let mode = if token.is(1, "light") {
            Self::Light
        } else if token.is(2, "dark") {
            Self::Dark
        } else {
            Self::System
        };
        Ok(mode)
    }
}

/// Window/tray/hotkey preferences consumed by the desktop host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub always_on_top: bool,
    pub minimize_to_tray_on_close: bool,
    pub start_with_windows: bool,
    pub start_minimized_to_tray: bool,
    pub confirm_before_exit: bool,
    pub theme_mode: ThemeMode,
    /// Shortcut string such as `Ctrl+Space`; see [`crate::hotkey::parse_hotkey`].
    pub hotkey: String,
    pub window_top: f64,
    pub window_left: f64,
    pub window_width: f64,
    pub window_height: f64,
    pub last_active_tab: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            always_on_top: false,
            minimize_to_tray_on_close: true,
            start_with_windows: false,
            start_minimized_to_tray: false,
            confirm_before_exit: true,
            theme_mode: ThemeMode::System,
            hotkey: "Ctrl+Space".to_string(),
            window_top: 100.0,
            window_left: 100.0,
            window_width: 960.0,
            window_height: 640.0,
            last_active_tab: "Notes".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppSettings, ThemeMode};

    #[test]
    fn partial_document_keeps_defaults_for_missing_fields() {
        let decoded: AppSettings =
            serde_json::from_str(r#"{"alwaysOnTop": true, "themeMode": "dark"}"#)
                .expect("partial settings should decode");
        assert!(decoded.always_on_top);
        assert_eq!(decoded.theme_mode, ThemeMode::Dark);
        assert!(decoded.confirm_before_exit);
        assert_eq!(decoded.hotkey, "Ctrl+Space");
    }

    #[test]
    fn theme_mode_decodes_from_variant_index() {
        let decoded: AppSettings =
            serde_json::from_str(r#"{"themeMode": 2, "windowWidth": 1200}"#)
                .expect("numeric theme should decode");
        assert_eq!(decoded.theme_mode, ThemeMode::Dark);
        assert_eq!(decoded.window_width, 1200.0);

        let unknown: ThemeMode = serde_json::from_str("9").expect("decode");
        assert_eq!(unknown, ThemeMode::System);
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let json = serde_json::to_value(AppSettings::default()).expect("encode");
        assert_eq!(json["minimizeToTrayOnClose"], true);
        assert_eq!(json["lastActiveTab"], "Notes");
        assert_eq!(json["themeMode"], "system");
    }
}
