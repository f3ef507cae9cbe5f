//! Destination folder resolution
//!
//! The installer never keeps a record of earlier runs. Each run re-derives a
//! free folder name by probing the file system, so a fresh run always lands
//! in the smallest unused suffix.

use crate::error::{IoContext, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// How a colliding folder name gets disambiguated
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SuffixPolicy {
    /// `name-2`, `name-3`, ...
    #[default]
    Dash,
    /// `name_1`, `name_2`, ...
    Underscore,
}

impl SuffixPolicy {
    fn first_index(&self) -> u32 {
        match self {
            SuffixPolicy::Dash => 2,
            SuffixPolicy::Underscore => 1,
        }
    }

    /// Candidate name for the given disambiguator
    pub fn apply(&self, base: &str, index: u32) -> String {
        match self {
            SuffixPolicy::Dash => format!("{}-{}", base, index),
            SuffixPolicy::Underscore => format!("{}_{}", base, index),
        }
    }
}

/// Pick the first name not reported as taken by `exists`
///
/// Probes `base` first, then suffixed candidates in order. Stops on the
/// first free name or the first probe error.
pub fn next_available_name<F>(
    mut exists: F,
    base: &str,
    policy: SuffixPolicy,
) -> io::Result<String>
where
    F: FnMut(&str) -> io::Result<bool>,
{
    if !exists(base)? {
        return Ok(base.to_string());
    }

    let mut index = policy.first_index();
    loop {
        let candidate = policy.apply(base, index);
        if !exists(&candidate)? {
            return Ok(candidate);
        }
        index += 1;
    }
}

/// Resolve a non-existing folder `base_dir/<name>` for installation
///
/// Only "not found" counts as free; any other probe failure is returned.
/// Existing folders are never opened or modified.
pub fn resolve_destination(
    base_dir: &Path,
    default_name: &str,
    policy: SuffixPolicy,
) -> Result<PathBuf> {
    let name = next_available_name(
        |candidate| base_dir.join(candidate).try_exists(),
        default_name,
        policy,
    )
    .io_context("probe", base_dir)?;

    Ok(base_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn pick(existing: &HashSet<String>, policy: SuffixPolicy) -> String {
        next_available_name(|n| Ok(existing.contains(n)), "identityuser", policy).unwrap()
    }

    #[test]
    fn test_default_name_when_free() {
        let existing = taken(&[]);
        let name = pick(&existing, SuffixPolicy::Dash);
        assert_eq!(name, "identityuser");
    }

    #[test]
    fn test_dash_policy_sequence() {
        let existing = taken(&["identityuser", "identityuser-2", "identityuser-3"]);
        let name = pick(&existing, SuffixPolicy::Dash);
        assert_eq!(name, "identityuser-4");
    }

    #[test]
    fn test_underscore_policy_sequence() {
        let existing = taken(&["identityuser", "identityuser_1"]);
        let name = pick(&existing, SuffixPolicy::Underscore);
        assert_eq!(name, "identityuser_2");
    }

    #[test]
    fn test_smallest_free_suffix_wins() {
        // identityuser-3 was removed after a later run created identityuser-4
        let existing = taken(&["identityuser", "identityuser-2", "identityuser-4"]);
        let name = pick(&existing, SuffixPolicy::Dash);
        assert_eq!(name, "identityuser-3");
    }

    #[test]
    fn test_stops_probing_at_first_free_name() {
        let mut probes = Vec::new();
        let name = next_available_name(
            |n| {
                probes.push(n.to_string());
                Ok(n == "identityuser")
            },
            "identityuser",
            SuffixPolicy::Dash,
        )
        .unwrap();
        assert_eq!(name, "identityuser-2");
        assert_eq!(probes, vec!["identityuser", "identityuser-2"]);
    }

    #[test]
    fn test_probe_error_propagates() {
        let result = next_available_name(
            |_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            "identityuser",
            SuffixPolicy::Dash,
        );
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_suffix_policy_from_yaml() {
        let policy: SuffixPolicy = serde_yaml_ng::from_str("underscore").unwrap();
        assert_eq!(policy, SuffixPolicy::Underscore);
        assert!(serde_yaml_ng::from_str::<SuffixPolicy>("dot").is_err());
    }

    #[test]
    fn test_suffix_policy_from_cli_value() {
        use clap::ValueEnum;
        assert_eq!(SuffixPolicy::from_str("dash", false), Ok(SuffixPolicy::Dash));
        assert!(SuffixPolicy::from_str("dot", false).is_err());
    }

    #[test]
    fn test_resolve_destination_on_disk() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();

        let first = resolve_destination(base, "identityuser", SuffixPolicy::Dash).unwrap();
        assert_eq!(first, base.join("identityuser"));

        fs::create_dir(&first).unwrap();
        fs::write(first.join("keep.txt"), "untouched").unwrap();

        let second = resolve_destination(base, "identityuser", SuffixPolicy::Dash).unwrap();
        assert_eq!(second, base.join("identityuser-2"));
        assert_eq!(fs::read_to_string(first.join("keep.txt")).unwrap(), "untouched");
    }

    #[test]
    fn test_plain_file_counts_as_collision() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("identityuser"), "").unwrap();

        let dest =
            resolve_destination(tmp.path(), "identityuser", SuffixPolicy::Underscore).unwrap();
        assert_eq!(dest, tmp.path().join("identityuser_1"));
    }
}
