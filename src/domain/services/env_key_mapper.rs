//! Environment variable → configuration key mapping
//!
//! `CARGO_BUILD_JOBS` can only be turned back into `build.jobs` with the
//! schema's help: underscores are ambiguous (`GIT_FETCH_WITH_CLI` is one
//! segment, `git-fetch-with-cli`). The mapper walks the schema patterns as a
//! trie, matching literal segments greedily by their environment spelling.
//!
//! A wildcard segment consumes the fewest words that still let the rest of
//! the name resolve. Its spelling is taken from an existing key in the
//! already-merged file tree when one has the same environment form
//! (`target.x86_64-unknown-linux-gnu`), otherwise the words are lowercased
//! and joined with `-`.
//!
//! Free-form (`Any`) entries are not reachable from the environment.

use crate::domain::entities::ConfigValue;
use crate::domain::schema::{SchemaRegistry, Shape};
use crate::domain::value_objects::{env_segment, ConfigKey, WILDCARD};

pub struct EnvKeyMapper<'a> {
    prefix: &'a str,
    patterns: Vec<Vec<&'static str>>,
    known: Option<&'a ConfigValue>,
}

impl<'a> EnvKeyMapper<'a> {
    pub fn new(registry: &'a SchemaRegistry, prefix: &'a str) -> Self {
        let patterns = registry
            .entries()
            .iter()
            .filter(|e| !matches!(e.shape, Shape::Any | Shape::Table))
            .map(|e| e.segments().collect())
            .collect();
        Self {
            prefix,
            patterns,
            known: None,
        }
    }

    /// Tree used to recover the spelling of wildcard segments.
    pub fn with_known_keys(mut self, tree: &'a ConfigValue) -> Self {
        self.known = Some(tree);
        self
    }

    /// Map a variable name to a key, or `None` if it has no schema match.
    /// Only exact-case names are mapped.
    pub fn map(&self, var: &str) -> Option<ConfigKey> {
        let rest = var.strip_prefix(self.prefix)?.strip_prefix('_')?;
        if rest.is_empty() {
            return None;
        }
        let words: Vec<&str> = rest.split('_').collect();
        if words.iter().any(|w| w.is_empty()) {
            return None;
        }

        let candidates: Vec<&[&'static str]> = self.patterns.iter().map(Vec::as_slice).collect();
        let mut key = ConfigKey::root();
        self.resolve(&words, &candidates, &mut key).then_some(key)
    }

    fn resolve(&self, words: &[&str], candidates: &[&[&'static str]], key: &mut ConfigKey) -> bool {
        if words.is_empty() {
            return candidates.iter().any(|p| p.is_empty());
        }

        // Literal segments, longest environment spelling first.
        let mut literals: Vec<&'static str> = candidates
            .iter()
            .filter_map(|p| p.first().copied())
            .filter(|s| *s != WILDCARD)
            .collect();
        literals.sort_unstable();
        literals.dedup();
        literals.sort_by_key(|s| std::cmp::Reverse(env_segment(s).split('_').count()));

        for literal in literals {
            let spelled = env_segment(literal);
            let tokens: Vec<&str> = spelled.split('_').collect();
            if !words.starts_with(&tokens) {
                continue;
            }
            let next: Vec<&[&'static str]> = candidates
                .iter()
                .filter(|p| p.first() == Some(&literal))
                .map(|p| &p[1..])
                .collect();
            key.push(literal);
            if self.resolve(&words[tokens.len()..], &next, key) {
                return true;
            }
            key.pop();
        }

        let wild: Vec<&[&'static str]> = candidates
            .iter()
            .filter(|p| p.first() == Some(&WILDCARD))
            .map(|p| &p[1..])
            .collect();
        if wild.is_empty() {
            return false;
        }
        for take in 1..=words.len() {
            let segment = self.spell_wildcard(key, &words[..take]);
            key.push(segment);
            if self.resolve(&words[take..], &wild, key) {
                return true;
            }
            key.pop();
        }
        false
    }

    fn spell_wildcard(&self, parent: &ConfigKey, words: &[&str]) -> String {
        let env_form = words.join("_");
        let existing = self
            .known
            .and_then(|tree| tree.get(parent))
            .and_then(ConfigValue::as_table)
            .and_then(|table| table.keys().find(|k| env_segment(k) == env_form));
        match existing {
            Some(k) => k.clone(),
            None => words
                .iter()
                .map(|w| w.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join("-"),
        }
    }
}
