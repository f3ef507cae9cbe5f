use crate::error::{InstallError, Result};
use crate::setup::SuffixPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the installed folder
pub const DEFAULT_NAME: &str = "identityuser";

/// Path alias the bundled template imports itself through (`@/identityuser/...`)
pub const TEMPLATE_ALIAS: &str = "identityuser";

/// Project-local config file, looked up in the project root
pub const LOCAL_CONFIG_FILE: &str = "identityuser.yaml";

/// Template tree shipped next to the package manifest
pub fn bundled_template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("template").join(DEFAULT_NAME)
}

/// Resolved installer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Host project root, normally the working directory
    pub project_root: PathBuf,
    /// Folder under the project root that receives the install
    pub source_dir: PathBuf,
    pub template_dir: PathBuf,
    /// Preferred folder name; the template alias is rewritten to whatever
    /// name is finally chosen
    pub default_name: String,
    pub suffix_policy: SuffixPolicy,
}

impl InstallerConfig {
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            source_dir: PathBuf::from("src"),
            template_dir: bundled_template_dir(),
            default_name: DEFAULT_NAME.to_string(),
            suffix_policy: SuffixPolicy::default(),
        }
    }

    /// `<project_root>/<source_dir>`
    pub fn source_root(&self) -> PathBuf {
        self.project_root.join(&self.source_dir)
    }

    /// Overlay the fields set in a config file
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(source_dir) = file.source_dir {
            self.source_dir = source_dir;
        }
        if let Some(template_dir) = file.template_dir {
            self.template_dir = if template_dir.is_relative() {
                self.project_root.join(template_dir)
            } else {
                template_dir
            };
        }
        if let Some(name) = file.default_name {
            self.default_name = name;
        }
        if let Some(policy) = file.suffix_policy {
            self.suffix_policy = policy;
        }
    }
}

/// On-disk config, every field optional
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub source_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub default_name: Option<String>,
    pub suffix_policy: Option<SuffixPolicy>,
}

pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path)
        .map_err(|e| InstallError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    serde_yaml_ng::from_str(&contents)
        .map_err(|e| InstallError::Config(format!("invalid {}: {}", path.display(), e)))
}

/// Find the config file that applies to a project, if any
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    // 1. Project-local identityuser.yaml
    let local = project_root.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    // 2. ~/.config/identityuser/config.yaml
    get_config_path().filter(|p| p.is_file())
}

/// Build the config for a project from defaults plus an optional file
///
/// An explicit path must exist; otherwise the usual locations are searched.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<InstallerConfig> {
    let mut config = InstallerConfig::for_project(project_root);

    let file_path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(project_root),
    };
    if let Some(path) = file_path {
        config.apply_file(read_config_file(&path)?);
    }

    if config.default_name.is_empty() || config.default_name.contains(['/', '\\']) {
        return Err(InstallError::Config(format!(
            "default_name must be a single folder name, got {:?}",
            config.default_name
        )));
    }

    Ok(config)
}

/// User-level config file, searched when the project has none
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(DEFAULT_NAME).join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = InstallerConfig::for_project("/work/app");
        assert_eq!(config.source_root(), Path::new("/work/app/src"));
        assert_eq!(config.default_name, "identityuser");
        assert_eq!(config.suffix_policy, SuffixPolicy::Dash);
        assert!(config.template_dir.ends_with("template/identityuser"));
    }

    #[test]
    fn test_local_config_file_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(LOCAL_CONFIG_FILE),
            "suffix_policy: underscore\nsource_dir: web/src\ntemplate_dir: vendor/tpl\n",
        )
        .unwrap();

        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.suffix_policy, SuffixPolicy::Underscore);
        assert_eq!(config.source_root(), tmp.path().join("web/src"));
        assert_eq!(config.template_dir, tmp.path().join("vendor/tpl"));
        assert_eq!(config.default_name, "identityuser");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(tmp.path(), Some(&tmp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, InstallError::Config(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("c.yaml");
        fs::write(&path, "colour: blue\n").unwrap();
        assert!(read_config_file(&path).is_err());
    }

    #[test]
    fn test_nested_default_name_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("c.yaml");
        fs::write(&path, "default_name: a/b\n").unwrap();
        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }
}
