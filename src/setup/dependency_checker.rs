//! Dependency version advisory for the host project
//!
//! Reads the dependency versions npm exposes to package scripts and warns
//! about versions below a known-safe minimum. Nothing here is fatal: a
//! missing or unreadable version simply produces no warning.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

// First dotted number run, so range prefixes like ^, ~ or >= are skipped
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").unwrap());

/// A dependency with a minimum supported version
#[derive(Debug, Clone, Copy)]
pub struct DependencyRule {
    pub name: &'static str,
    /// Environment variables to read, first set one wins
    pub env_keys: &'static [&'static str],
    pub minimum: &'static str,
    pub warning: &'static str,
}

/// Rules checked by the advisory
pub const RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "react",
        env_keys: &["npm_package_dependencies_react", "npm_package_peerDependencies_react"],
        minimum: "19.2.1",
        warning: "React < 19.2.1 detected. This version may be vulnerable to critical RCE issues \
                  (React2Shell). Upgrade is strongly recommended.",
    },
    DependencyRule {
        name: "next",
        env_keys: &["npm_package_dependencies_next", "npm_package_peerDependencies_next"],
        minimum: "15.5.7",
        warning: "Next.js < 15.5.7 detected. This version may be vulnerable to known \
                  Server Components issues.",
    },
];

/// Result of checking a single dependency
#[derive(Debug, Clone, Default)]
pub struct DependencyStatus {
    pub name: String,
    pub version: Option<String>,
    pub minimum: String,
    pub below_minimum: bool,
}

/// All dependencies checked by the advisory
#[derive(Debug, Clone, Default)]
pub struct DependencyReport {
    pub statuses: Vec<DependencyStatus>,
    pub warnings: Vec<String>,
}

impl DependencyReport {
    /// Check all rules against the process environment
    pub fn check() -> Self {
        Self::check_with(|key| std::env::var(key).ok())
    }

    /// Check all rules against an arbitrary variable lookup
    pub fn check_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut report = Self::default();

        for rule in RULES {
            let version = rule
                .env_keys
                .iter()
                .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()));
            let below_minimum = version
                .as_deref()
                .is_some_and(|v| is_below_minimum(v, rule.minimum));

            if below_minimum {
                report.warnings.push(rule.warning.to_string());
            }
            report.statuses.push(DependencyStatus {
                name: rule.name.to_string(),
                version,
                minimum: rule.minimum.to_string(),
                below_minimum,
            });
        }

        report
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Lines to print when warnings exist, empty otherwise
    pub fn notice_lines(&self) -> Vec<String> {
        if !self.has_warnings() {
            return Vec::new();
        }

        let mut lines = vec![
            String::new(),
            "⚠️  identityuser security notice:".to_string(),
            String::new(),
        ];
        lines.extend(self.warnings.iter().map(|w| format!(" - {}", w)));
        lines.push(String::new());
        lines.push("Please upgrade to the minimum supported versions.".to_string());
        lines.push(String::new());
        lines
    }
}

/// Parse the numeric components of a version string
pub fn parse_version(version: &str) -> Option<Vec<u64>> {
    let found = VERSION_PATTERN.find(version)?;
    found.as_str().split('.').map(|part| part.parse().ok()).collect()
}

/// Component-wise comparison, missing components count as 0
pub fn compare_versions(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True only when both versions parse and `version < minimum`
pub fn is_below_minimum(version: &str, minimum: &str) -> bool {
    match (parse_version(version), parse_version(minimum)) {
        (Some(v), Some(m)) => compare_versions(&v, &m) == Ordering::Less,
        _ => false,
    }
}
