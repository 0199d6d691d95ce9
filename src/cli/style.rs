//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Styling shortcuts that respect color support on stdout
pub trait Stylize: Display {
    /// Bold text
    fn emphasis(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    /// Dimmed text
    fn muted(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    /// Highlighted value
    fn accent(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    /// Success message
    fn success(&self) -> String {
        self.to_string()
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render a PR link, as a hyperlink when the terminal supports it
pub fn pr_link(number: u64, url: &str) -> String {
    let text = format!("#{number}");
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(&text, url).to_string()
    } else {
        format!("{text} ({url})")
    }
}
