//! Dotted configuration keys
//!
//! A key is an ordered list of segments. Segments that are not bare TOML
//! keys (`A-Za-z0-9_-`) are quoted when displayed, so `target."cfg(unix)".runner`
//! round-trips through [`ConfigKey::parse`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// Wildcard segment used by schema patterns.
pub const WILDCARD: &str = "*";

/// A dotted path into the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    parts: Vec<String>,
}

impl ConfigKey {
    /// The empty key, naming the root table.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted key. Segments may be double-quoted to contain dots.
    pub fn parse(input: &str) -> ConfigResult<Self> {
        let invalid = |message: &str| ConfigError::InvalidKey {
            key: input.to_string(),
            message: message.to_string(),
        };

        let mut parts = Vec::new();
        let mut chars = input.chars().peekable();
        loop {
            while chars.next_if(|c| *c == ' ' || *c == '\t').is_some() {}
            match chars.peek() {
                None => return Err(invalid("expected a key segment")),
                Some('"') => {
                    chars.next();
                    let mut part = String::new();
                    loop {
                        match chars.next() {
                            None => return Err(invalid("unterminated quoted segment")),
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(c @ ('"' | '\\')) => part.push(c),
                                _ => return Err(invalid("invalid escape in quoted segment")),
                            },
                            Some(c) => part.push(c),
                        }
                    }
                    parts.push(part);
                }
                Some(_) => {
                    let mut part = String::new();
                    while let Some(c) = chars.next_if(|c| *c != '.' && *c != ' ' && *c != '\t') {
                        if !is_bare_char(c) {
                            return Err(invalid(&format!(
                                "unexpected character `{}` in unquoted segment",
                                c
                            )));
                        }
                        part.push(c);
                    }
                    if part.is_empty() {
                        return Err(invalid("empty key segment"));
                    }
                    parts.push(part);
                }
            }
            while chars.next_if(|c| *c == ' ' || *c == '\t').is_some() {}
            match chars.next() {
                None => break,
                Some('.') => continue,
                Some(c) => {
                    return Err(invalid(&format!("expected `.` but found `{}`", c)));
                }
            }
        }
        Ok(Self { parts })
    }

    pub fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.parts.pop()
    }

    /// A new key with `part` appended.
    pub fn child(&self, part: impl Into<String>) -> Self {
        let mut key = self.clone();
        key.push(part);
        key
    }

    pub fn parent(&self) -> Option<Self> {
        if self.parts.is_empty() {
            return None;
        }
        Some(Self {
            parts: self.parts[..self.parts.len() - 1].to_vec(),
        })
    }

    pub fn parts(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.iter().map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.parts
    }

    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn starts_with(&self, prefix: &ConfigKey) -> bool {
        self.parts.starts_with(&prefix.parts)
    }

    /// Environment variable name for this key: `PREFIX_SEG_SEG`.
    pub fn as_env_key(&self, prefix: &str) -> String {
        let mut name = prefix.to_string();
        for part in &self.parts {
            name.push('_');
            name.push_str(&env_segment(part));
        }
        name
    }

    /// Match against a dotted schema pattern, where `*` stands for exactly
    /// one segment.
    pub fn matches(&self, pattern: &str) -> bool {
        let mut pattern_parts = pattern.split('.');
        for part in &self.parts {
            match pattern_parts.next() {
                Some(WILDCARD) => {}
                Some(expected) if expected == part => {}
                _ => return false,
            }
        }
        pattern_parts.next().is_none()
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&escape_key_part(part))?;
        }
        Ok(())
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Quote a segment unless it is a bare TOML key.
pub fn escape_key_part(part: &str) -> Cow<'_, str> {
    if !part.is_empty() && part.chars().all(is_bare_char) {
        return Cow::Borrowed(part);
    }
    let mut quoted = String::with_capacity(part.len() + 2);
    quoted.push('"');
    for c in part.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Environment form of one segment: uppercase, with `-` and `.` as `_`.
pub fn env_segment(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
