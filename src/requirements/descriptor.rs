use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RequirementsError, RequirementsResult};

/// Requirement lists of a package, as read from a JSON packaging descriptor.
///
/// ```json
/// { "install_requires": ["pandas>=1.1"], "extras": { "all": ["dnspython>=2.0"] } }
/// ```
///
/// Other top-level keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsDescriptor {
    #[serde(default)]
    pub install_requires: Vec<String>,
    #[serde(default)]
    pub extras: IndexMap<String, Vec<String>>,
}

impl RequirementsDescriptor {
    pub fn load(path: &Path) -> RequirementsResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| RequirementsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor: Self =
            serde_json::from_str(&raw).map_err(|source| RequirementsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            base = descriptor.install_requires.len(),
            extras = descriptor.extras.len(),
            "loaded packaging descriptor"
        );
        Ok(descriptor)
    }

    /// Requirements of `extra`, optionally merged with the base install
    /// requirements, deduplicated and sorted case-insensitively.
    pub fn collect(&self, extra: &str, include_base: bool) -> RequirementsResult<Vec<String>> {
        let mut collected = self
            .extras
            .get(extra)
            .cloned()
            .ok_or_else(|| RequirementsError::UnknownExtra(extra.to_owned()))?;

        if include_base {
            collected.extend(
                self.install_requires
                    .iter()
                    .map(|req| req.trim())
                    .filter(|req| !req.is_empty() && !req.starts_with('#'))
                    .map(str::to_owned),
            );
        }

        collected.sort();
        collected.dedup();
        Ok(casefold_sorted(collected))
    }
}

/// Sorts requirement lines ignoring case; ties keep their relative order.
#[must_use]
pub fn casefold_sorted(mut requirements: Vec<String>) -> Vec<String> {
    requirements.sort_by_cached_key(|req| req.to_lowercase());
    requirements
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{RequirementsDescriptor, casefold_sorted};
    use crate::error::RequirementsError;

    fn descriptor() -> RequirementsDescriptor {
        let mut extras = IndexMap::new();
        extras.insert(
            "all".to_owned(),
            vec![
                "vt-py>=0.6.1".to_owned(),
                "Keyring>=13.2.1".to_owned(),
                "dnspython>=2.0.0".to_owned(),
            ],
        );
        RequirementsDescriptor {
            install_requires: vec![
                "  pandas>=1.1.5 ".to_owned(),
                "# pinned for notebooks".to_owned(),
                "dnspython>=2.0.0".to_owned(),
            ],
            extras,
        }
    }

    #[test]
    fn collect_merges_base_and_deduplicates() {
        let reqs = descriptor().collect("all", true).expect("known extra");
        assert_eq!(
            reqs,
            vec![
                "dnspython>=2.0.0",
                "Keyring>=13.2.1",
                "pandas>=1.1.5",
                "vt-py>=0.6.1",
            ]
        );
    }

    #[test]
    fn collect_without_base_only_reads_extra() {
        let reqs = descriptor().collect("all", false).expect("known extra");
        assert_eq!(reqs.len(), 3);
        assert!(!reqs.iter().any(|req| req.starts_with("pandas")));
    }

    #[test]
    fn unknown_extra_is_reported() {
        let err = descriptor()
            .collect("azure", false)
            .expect_err("unknown extra must fail");
        assert!(matches!(err, RequirementsError::UnknownExtra(name) if name == "azure"));
    }

    #[test]
    fn casefold_sort_ignores_case() {
        let sorted = casefold_sorted(vec!["b".to_owned(), "A".to_owned(), "a".to_owned()]);
        assert_eq!(sorted, vec!["A", "a", "b"]);
    }
}
