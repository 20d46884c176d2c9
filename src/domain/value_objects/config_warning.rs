//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

use super::Definition;

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Warnings never stop resolution; the caller decides whether to print them
/// or (with `check --deny-warnings`) treat them as failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted key, or the environment variable name for env warnings
    pub key: String,
    /// Where the offending value or file came from
    pub definition: Definition,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// No schema entry matches the key
    UnrecognizedKey { suggestion: Option<String> },
    /// The key is still honored but has been superseded
    Deprecated { note: String },
    /// A prefixed env var matches a key only when uppercased
    EnvCaseMismatch { expected: String },
    /// Only the extension-less legacy file exists in a config directory
    LegacyFileName { preferred: PathBuf },
    /// Both the legacy and the `.toml` file exist; the legacy one was loaded
    BothFilesExist { ignored: PathBuf },
    /// A key reached a typed section that has no field for it
    UnusedSectionField,
}

impl ConfigWarning {
    pub fn new(key: impl Into<String>, definition: Definition, kind: WarningKind) -> Self {
        Self {
            key: key.into(),
            definition,
            line: None,
            kind,
        }
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Short hint printed under the warning, if there is one.
    pub fn help(&self) -> Option<String> {
        match &self.kind {
            WarningKind::UnrecognizedKey {
                suggestion: Some(suggestion),
            } => Some(format!("a similar key exists: `{}`", suggestion)),
            WarningKind::EnvCaseMismatch { expected } => {
                Some(format!("environment variables are case-sensitive; use `{}`", expected))
            }
            WarningKind::LegacyFileName { preferred } => {
                Some(format!("rename the file to `{}`", preferred.display()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnrecognizedKey { .. } => {
                write!(f, "unused config key `{}` in `{}`", self.key, self.definition)?
            }
            WarningKind::Deprecated { note } => write!(
                f,
                "config key `{}` in `{}` is deprecated: {}",
                self.key, self.definition, note
            )?,
            WarningKind::EnvCaseMismatch { expected } => write!(
                f,
                "environment variable `{}` was ignored; did you mean `{}`?",
                self.key, expected
            )?,
            WarningKind::LegacyFileName { .. } => write!(
                f,
                "`{}` is deprecated in favor of `config.toml`",
                self.definition
            )?,
            WarningKind::BothFilesExist { ignored } => write!(
                f,
                "both `{}` and `{}` exist; using `{}`",
                self.definition,
                ignored.display(),
                self.definition
            )?,
            WarningKind::UnusedSectionField => write!(
                f,
                "config key `{}` in `{}` is not used by this section",
                self.key, self.definition
            )?,
        }
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}
