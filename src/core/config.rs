//! Table settings.
//!
//! Settings are loaded once at startup from a JSON object and passed by
//! reference to every game controller. The two framework sections, `window`
//! and `card`, are validated field by field; every game reads its own
//! section through [`Settings::section`].
//!
//! ## Recovery
//!
//! A missing or malformed field is replaced with its documented default and a
//! warning is logged. Only an unreadable file, invalid JSON or a non-object
//! root is fatal (see [`SettingsError`]).
//!
//! ## Example JSON
//!
//! ```json
//! {
//!   "window": { "title": "Crazy Eights", "size": [800, 600], "background_color": [0, 120, 0] },
//!   "card": { "size": [65, 85], "move_speed": 80 },
//!   "crazy_eights": { "opponent_behavior": { "min_delay_ms": 500, "max_delay_ms": 1500 } }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use tracing::warn;

use super::error::SettingsError;
use super::geometry::{Color, Size};

/// Window-level settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub size: Size,
    pub background_color: Color,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Card Table".to_string(),
            size: Size::new(570.0, 460.0),
            background_color: Color::new(0, 153, 0),
        }
    }
}

/// Card geometry and default movement speed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSettings {
    pub size: Size,
    /// Pixels per second for animated moves.
    pub move_speed: f64,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            size: Size::new(65.0, 85.0),
            move_speed: 80.0,
        }
    }
}

/// Settings for one table session.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub window: WindowSettings,
    pub card: CardSettings,
    sections: Map<String, JsonValue>,
}

impl Settings {
    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let value: JsonValue = serde_json::from_str(text)?;
        let JsonValue::Object(sections) = value else {
            return Err(SettingsError::NotAnObject);
        };

        let window = window_settings(sections.get("window"));
        let card = card_settings(sections.get("card"));

        Ok(Self {
            window,
            card,
            sections,
        })
    }

    /// Builder: replace the card settings.
    #[must_use]
    pub fn with_card(mut self, card: CardSettings) -> Self {
        self.card = card;
        self
    }

    /// Builder: set a raw section, as if it had been present in the file.
    #[must_use]
    pub fn with_section(mut self, key: &str, value: JsonValue) -> Self {
        self.sections.insert(key.to_string(), value);
        self
    }

    /// Raw JSON of a section, if present.
    #[must_use]
    pub fn raw_section(&self, key: &str) -> Option<&JsonValue> {
        self.sections.get(key)
    }

    /// Deserialize a game section, falling back to `T::default()`.
    ///
    /// Fields absent from the JSON take their default through
    /// `#[serde(default)]` on `T`.
    pub fn section<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.sections.get(key) {
            None => {
                warn!(section = key, "settings section missing, using defaults");
                T::default()
            }
            Some(value) => T::deserialize(value).unwrap_or_else(|err| {
                warn!(section = key, error = %err, "settings section malformed, using defaults");
                T::default()
            }),
        }
    }
}

fn window_settings(value: Option<&JsonValue>) -> WindowSettings {
    let defaults = WindowSettings::default();
    WindowSettings {
        title: field(value, "window", "title", defaults.title),
        size: field(value, "window", "size", defaults.size),
        background_color: field(value, "window", "background_color", defaults.background_color),
    }
}

fn card_settings(value: Option<&JsonValue>) -> CardSettings {
    let defaults = CardSettings::default();
    CardSettings {
        size: field(value, "card", "size", defaults.size),
        move_speed: field(value, "card", "move_speed", defaults.move_speed),
    }
}

/// Read one field of a framework section, substituting `default` with a warning.
fn field<T: DeserializeOwned + std::fmt::Debug>(
    section: Option<&JsonValue>,
    section_name: &str,
    key: &str,
    default: T,
) -> T {
    let Some(raw) = section.and_then(|s| s.get(key)) else {
        warn!(section = section_name, key, ?default, "setting missing, using default");
        return default;
    };
    match T::deserialize(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(section = section_name, key, error = %err, ?default, "setting malformed, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Demo {
        delay: u64,
        name: String,
    }

    #[test]
    fn test_full_settings() {
        let settings = Settings::from_json_str(
            r#"{
                "window": {"title": "War", "size": [800, 600], "background_color": [1, 2, 3]},
                "card": {"size": [70, 90], "move_speed": 120}
            }"#,
        )
        .unwrap();

        assert_eq!(settings.window.title, "War");
        assert_eq!(settings.window.size, Size::new(800.0, 600.0));
        assert_eq!(settings.window.background_color, Color::new(1, 2, 3));
        assert_eq!(settings.card.size, Size::new(70.0, 90.0));
        assert_eq!(settings.card.move_speed, 120.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json_str(r#"{"card": {"size": "big"}}"#).unwrap();
        assert_eq!(settings.window, WindowSettings::default());
        assert_eq!(settings.card.size, Size::new(65.0, 85.0));
        assert_eq!(settings.card.move_speed, 80.0);
    }

    #[test]
    fn test_section_fallbacks() {
        let settings = Settings::default()
            .with_section("good", json!({"delay": 5}))
            .with_section("bad", json!({"delay": "soon"}));

        assert_eq!(settings.section::<Demo>("good"), Demo { delay: 5, name: String::new() });
        assert_eq!(settings.section::<Demo>("bad"), Demo::default());
        assert_eq!(settings.section::<Demo>("absent"), Demo::default());
    }

    #[test]
    fn test_fatal_errors() {
        assert!(matches!(Settings::from_json_str("[1, 2]"), Err(SettingsError::NotAnObject)));
        assert!(matches!(Settings::from_json_str("{"), Err(SettingsError::Parse(_))));
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(SettingsError::Io { .. })
        ));
    }
}
