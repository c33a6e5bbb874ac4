//! # Output Configuration
//!
//! Controls how the import summary is decorated on stdout. Log records go
//! through `log`/`env_logger` and are not affected by this module.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables decorations when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables decorations
//! - `CLICOLOR_FORCE=1` - Forces decorations even in non-TTY
//! - `TERM=dumb` - Disables decorations for dumb terminals

use std::env;

/// Output configuration for the summary printed after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether emoji markers should be used instead of bracketed text.
    pub use_color: bool,
}

impl OutputConfig {
    /// Build a configuration from the `--color` flag value.
    ///
    /// `always` and `never` are taken literally; anything else inspects the
    /// environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables, even when empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Marker for a step that completed.
    pub fn ok(&self) -> &'static str {
        emoji(self, "✅", "[OK]")
    }

    /// Marker for a step that completed with warnings.
    pub fn warn(&self) -> &'static str {
        emoji(self, "⚠️", "[WARN]")
    }

    /// Marker for informational lines.
    pub fn info(&self) -> &'static str {
        emoji(self, "📷", "[INFO]")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Pick the emoji or its plain text alternative depending on `config`.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
