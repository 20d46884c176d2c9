//! Terminal styling for human-readable output.

use crossterm::style::{Color, Stylize};

use crate::config::ColorMode;
use crate::domain::value_objects::EnvSnapshot;

/// The only colors the CLI uses.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => colors::SUCCESS,
            Tone::Error => colors::ERROR,
            Tone::Warning => colors::WARNING,
            Tone::Info => colors::INFO,
            Tone::Dim => colors::DIM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styled {
    text: String,
    tone: Option<Tone>,
    bold: bool,
}

impl Styled {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            bold: false,
        }
    }

    pub fn toned(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, color: bool) -> String {
        if !color {
            return self.text.clone();
        }
        let mut styled = self.text.as_str().stylize();
        if let Some(tone) = self.tone {
            styled = styled.with(tone.color());
        }
        if self.bold {
            styled = styled.bold();
        }
        format!("{}", styled)
    }
}

/// Whether to emit ANSI colors. `auto` colors only a terminal that is not
/// `TERM=dumb` and has no `NO_COLOR`.
pub fn use_color(mode: ColorMode, is_tty: bool, env: &EnvSnapshot) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let dumb = env
                .get("TERM")
                .is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
            is_tty && !dumb && !env.contains("NO_COLOR")
        }
    }
}
