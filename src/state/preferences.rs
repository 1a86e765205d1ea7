//! Preference blobs edited by the settings panels.
//!
//! DESIGN
//! ======
//! Blobs are persisted as JSON and may have been written by an older build
//! that stored toggles as `0`/`1`. Every field has a default, toggles
//! accept booleans, numbers, or `"true"`/`"1"` strings, and the two sliders
//! accept numbers or numeric strings clamped to their range. A partially
//! written blob still loads.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;
pub const DEFAULT_FONT_SIZE: u8 = 14;
pub const DEFAULT_ACCENT_COLOR: &str = "#1CA1C1";
pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 50;

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    #[serde(deserialize_with = "flag")]
    pub email_enabled: bool,
    #[serde(deserialize_with = "flag")]
    pub security_alerts: bool,
    #[serde(deserialize_with = "flag")]
    pub system_notif: bool,
    #[serde(deserialize_with = "flag")]
    pub messages: bool,
    #[serde(deserialize_with = "flag")]
    pub post_updates: bool,
    /// `instant`, `daily`, or `dnd`.
    pub frequency: String,
    #[serde(deserialize_with = "flag")]
    pub sound_enabled: bool,
    pub sound_file: String,
    /// 0..=100.
    #[serde(deserialize_with = "volume")]
    pub volume: u8,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_enabled: true,
            security_alerts: true,
            system_notif: true,
            messages: false,
            post_updates: false,
            frequency: "instant".to_owned(),
            sound_enabled: true,
            sound_file: "chime".to_owned(),
            volume: DEFAULT_VOLUME,
        }
    }
}

// =============================================================================
// PRIVACY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    /// `public` or `private`.
    pub account_privacy: String,
    #[serde(deserialize_with = "flag")]
    pub show_activity: bool,
    #[serde(deserialize_with = "flag")]
    pub personalized_recommendations: bool,
    #[serde(deserialize_with = "flag")]
    pub two_factor: bool,
    /// `mobile` or `email`.
    pub two_factor_method: String,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            account_privacy: "public".to_owned(),
            show_activity: true,
            personalized_recommendations: true,
            two_factor: false,
            two_factor_method: "mobile".to_owned(),
        }
    }
}

// =============================================================================
// THEME
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the system color-scheme preference.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Default,
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    pub const ALL: [Self; 4] = [Self::Default, Self::Sans, Self::Serif, Self::Mono];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "System Default",
            Self::Sans => "Sans-serif (Arial)",
            Self::Serif => "Serif (Georgia)",
            Self::Mono => "Monospace (Courier)",
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.as_str() == raw).unwrap_or_default()
    }
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "dark" => Self::Dark,
            "auto" => Self::Auto,
            _ => Self::Light,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePreferences {
    pub theme_mode: ThemeMode,
    #[serde(deserialize_with = "font_size")]
    pub font_size: u8,
    pub font_family: FontFamily,
    pub accent_color: String,
    #[serde(deserialize_with = "flag")]
    pub high_contrast: bool,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Light,
            font_size: DEFAULT_FONT_SIZE,
            font_family: FontFamily::Default,
            accent_color: DEFAULT_ACCENT_COLOR.to_owned(),
            high_contrast: false,
        }
    }
}

impl ThemePreferences {
    /// Font size clamped to the supported slider range.
    pub fn clamped_font_size(&self) -> u8 {
        self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v.abs() > f64::EPSILON),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "on"),
        _ => false,
    })
}

fn volume<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(slider(&Value::deserialize(deserializer)?, 0, MAX_VOLUME).unwrap_or(DEFAULT_VOLUME))
}

fn font_size<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(slider(&Value::deserialize(deserializer)?, MIN_FONT_SIZE, MAX_FONT_SIZE).unwrap_or(DEFAULT_FONT_SIZE))
}

/// Integer or integer string clamped to `min..=max`; anything else is `None`.
fn slider(value: &Value, min: u8, max: u8) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => return None,
        },
        _ => return None,
    };
    Some(u8::try_from(raw.clamp(i64::from(min), i64::from(max))).unwrap_or(min))
}
