//! Styling for command output

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout accepts ANSI colours. Honours `NO_COLOR` and
/// `FORCE_COLOR`.
fn stdout_has_color() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if stdout_has_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Output styles for summary lines
pub trait Style {
    /// A file written or an action completed (green)
    fn done(&self) -> String;
    /// Something the user should look at (amber)
    fn caution(&self) -> String;
    /// A count or value (blue)
    fn value(&self) -> String;
    /// Secondary detail
    fn muted(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Style for T {
    fn done(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn caution(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn value(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().to_string())
    }

    fn muted(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}
