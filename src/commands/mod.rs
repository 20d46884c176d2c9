//! Command handlers for the confstack binary.

pub mod check;
pub mod get;
pub mod schema;
pub mod sources;

use is_terminal::IsTerminal;

use anyhow::Result;

use confstack::application::Resolution;
use confstack::config::{ColorMode, Section, TermConfig};
use confstack::domain::value_objects::EnvSnapshot;
use confstack::presentation::report::{render_overrides, render_warnings};
use confstack::presentation::style::use_color;
use confstack::presentation::{create_resolver, ResolveOptions};

/// Everything a command needs from the global flags.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub options: ResolveOptions,
    pub json: bool,
    pub verbose: u8,
    /// `--color`, when given
    pub color: Option<ColorMode>,
    pub env: EnvSnapshot,
}

impl CommandContext {
    pub fn resolve(&self) -> Result<Resolution> {
        let resolution = create_resolver(&self.options, self.env.clone()).resolve()?;
        Ok(resolution)
    }

    /// `--color` wins; otherwise `term.color` from the resolved configuration.
    fn color_mode(&self, resolution: &Resolution) -> ColorMode {
        self.color.unwrap_or_else(|| {
            TermConfig::load(&resolution.config)
                .map(|(term, _)| term.color)
                .unwrap_or_default()
        })
    }

    pub fn stdout_color(&self, resolution: &Resolution) -> bool {
        use_color(
            self.color_mode(resolution),
            std::io::stdout().is_terminal(),
            &self.env,
        )
    }

    pub fn stderr_color(&self, resolution: &Resolution) -> bool {
        use_color(
            self.color_mode(resolution),
            std::io::stderr().is_terminal(),
            &self.env,
        )
    }

    /// Print resolution warnings to stderr, and overrides at `-v`.
    pub fn report_diagnostics(&self, resolution: &Resolution) {
        let color = self.stderr_color(resolution);
        eprint!("{}", render_warnings(&resolution.warnings, color));
        if self.verbose > 0 {
            eprint!("{}", render_overrides(&resolution.overrides));
        }
    }
}
