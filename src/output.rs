//! Terminal output styling
//!
//! Colors and layout shared by the line-mode runner.

use crossterm::{
    ExecutableCommand,
    style::{Color, Print, Stylize, style},
};
use std::io::stdout;

/// CLI theme colors
pub struct CliTheme;

impl CliTheme {
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const HINT: Color = Color::DarkGrey;
    pub const ACCENT: Color = Color::Cyan;
}

pub fn print_separator() {
    let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
}

pub fn print_title(title: &str) {
    let _ = stdout().execute(Print(format!("{}\n", title.bold())));
}

pub fn print_warning(msg: &str) {
    let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
    let _ = stdout().execute(Print(format!("{}\n", msg)));
}

pub fn print_error(msg: &str) {
    let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
    let _ = stdout().execute(Print(format!("{}\n", msg)));
}

pub fn print_hint(msg: &str) {
    let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
    let _ = stdout().execute(Print(format!("{}\n", msg)));
}

/// `  key: value`, bold unless a color is given
pub fn print_key_value(key: &str, value: &str, value_color: Option<Color>) {
    let value_styled = match value_color {
        Some(color) => style(value).with(color),
        None => style(value).bold(),
    };
    let _ = stdout().execute(Print("  "));
    let _ = stdout().execute(Print(style(key).with(CliTheme::HINT)));
    let _ = stdout().execute(Print(": "));
    let _ = stdout().execute(Print(value_styled));
    let _ = stdout().execute(Print("\n"));
}

pub fn print_stat(key: &str, value: &str, color: Color) {
    print_key_value(key, value, Some(color));
}

/// Overwrite the current terminal line
pub fn print_progress(line: &str) {
    let _ = stdout().execute(Print(format!("\r{}", line)));
}

pub fn print_blank() {
    let _ = stdout().execute(Print("\n"));
}
