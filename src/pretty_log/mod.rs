use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::Stdout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Main,
    Second,
    Success,
    Warn,
    Error,
}

impl From<ThemeColor> for Color {
    fn from(value: ThemeColor) -> Self {
        match value {
            ThemeColor::Main => Color::Reset,
            ThemeColor::Second => Color::DarkGrey,
            ThemeColor::Success => Color::Green,
            ThemeColor::Warn => Color::Yellow,
            ThemeColor::Error => Color::Red,
        }
    }
}

pub fn colored_println(stdout: &mut Stdout, color: ThemeColor, content: &str) {
    let _ = execute!(
        stdout,
        SetForegroundColor(color.into()),
        Print(content),
        ResetColor,
        Print("\n"),
    );
}

/// Print a `hint value` line, the hint dimmed.
pub fn hint_println(stdout: &mut Stdout, hint: &str, value: &str) {
    let _ = execute!(
        stdout,
        SetForegroundColor(ThemeColor::Second.into()),
        Print(hint),
        ResetColor,
        Print(" "),
        Print(value),
        Print("\n"),
    );
}
