//! # Output Configuration
//!
//! Controls the appearance of the end-of-run summary: emoji or plain-text
//! markers depending on terminal capabilities and user preferences.
//!
//! The following environment variables and flags are respected:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Log lines are not affected; they go to stderr through the logger.

use std::env;

use crate::orchestrator::RunSummary;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` forces emoji on (even
    /// with `NO_COLOR`), `never` forces them off, anything else detects
    /// support from the environment and stdout.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
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

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render the human-readable summary of a run, one line per fact.
pub fn render_summary(config: &OutputConfig, summary: &RunSummary) -> String {
    let mut lines = Vec::new();

    let counts = format!(
        "{} synced, {} skipped, {} deleted",
        summary.synced.len(),
        summary.skipped.len(),
        summary.deleted.len()
    );

    if summary.has_failures() {
        lines.push(format!(
            "{} Checkout finished with {} failure(s) in {:.2}s ({})",
            emoji(config, "❌", "[FAIL]"),
            summary.failed.len(),
            summary.elapsed.as_secs_f64(),
            counts
        ));
        for failed in &summary.failed {
            lines.push(format!("   {}: {}", failed.identity, failed.message));
        }
    } else if summary.synced.is_empty() {
        lines.push(format!(
            "{} No extensions matched ({})",
            emoji(config, "ℹ️", "[INFO]"),
            counts
        ));
    } else {
        lines.push(format!(
            "{} Checkout finished in {:.2}s ({})",
            emoji(config, "✅", "[OK]"),
            summary.elapsed.as_secs_f64(),
            counts
        ));
    }

    lines.join("\n")
}
