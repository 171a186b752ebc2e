//! Suppression of configured metric names.

use regex::Regex;

const LOG_TARGET: &str = "    filter";

/// A set of compiled exclusion patterns for metric names.
///
/// Patterns use full-match semantics: `host\|cpus\|.*` suppresses every
/// metric under `host|cpus`, while a bare `cpus` suppresses nothing because
/// it never matches a whole name. Patterns that fail to compile are dropped
/// with a logged warning and never suppress anything.
#[derive(Debug, Default)]
pub struct ExclusionFilter {
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    #[must_use]
    pub fn compile<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = patterns
            .into_iter()
            .filter_map(|pattern| match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Invalid exclusion pattern '{pattern}', ignoring it: {e}");
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// Whether `metric_name` fully matches any pattern, checked in input
    /// order with a short-circuit on the first hit.
    #[must_use]
    pub fn is_excluded(&self, metric_name: &str) -> bool {
        let excluded = self.patterns.iter().any(|pattern| pattern.is_match(metric_name));
        if excluded {
            log::debug!(target: LOG_TARGET, "'{metric_name}' matched an exclusion pattern");
        }

        excluded
    }

    /// Number of patterns that compiled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
