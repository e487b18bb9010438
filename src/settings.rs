//! Runtime settings
//!
//! Read once at startup from the page query string. Nothing is saved.

use serde::{Deserialize, Serialize};

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Steer the paddle with the mouse. Once the pointer has moved over the
    /// surface it overrides the arrow keys for the rest of the session.
    pub pointer_control: bool,
    /// Publish frames per second alongside the score
    pub show_fps: bool,
    /// Console log verbosity
    pub log_level: LogLevel,
    /// Start with the demo controller driving the paddle
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pointer_control: true,
            show_fps: false,
            log_level: LogLevel::Info,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse `?pointer=off&fps=on&log=debug&demo=on`. Unknown keys and bad
    /// values keep their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "on"));
            let applied = match key {
                "pointer" => parse_flag(value).map(|v| settings.pointer_control = v),
                "fps" => parse_flag(value).map(|v| settings.show_fps = v),
                "demo" => parse_flag(value).map(|v| settings.autopilot = v),
                "log" => LogLevel::from_str(value).map(|v| settings.log_level = v),
                _ => None,
            };
            if applied.is_none() {
                log::warn!("Ignoring setting '{}'", pair);
            }
        }

        settings
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
