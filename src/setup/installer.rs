//! Installation run: place the template tree and wire up the routes

use crate::config::{InstallerConfig, TEMPLATE_ALIAS};
use crate::error::{InstallError, IoContext, Result};
use crate::setup::alias::rewrite_alias_references;
use crate::setup::copy::copy_tree;
use crate::setup::destination::resolve_destination;
use crate::setup::routes::{emit_route_files, route_dirs};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a finished installation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Folder the template was copied into
    pub destination: PathBuf,
    /// Folder name, also the `@/` alias the routes import from
    pub alias: String,
    /// Number of copied files whose imports were rewritten (0 when not renamed)
    pub rewritten_files: usize,
    pub route_files: Vec<PathBuf>,
}

pub struct Installer {
    config: InstallerConfig,
}

impl Installer {
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    /// Run every step in order, stopping at the first failure
    ///
    /// Nothing written before a failure is cleaned up.
    pub fn run(&self) -> Result<InstallReport> {
        let config = &self.config;
        println!("🚀 Initializing {}...", config.default_name);

        if !config.template_dir.is_dir() {
            return Err(InstallError::TemplateMissing(config.template_dir.clone()));
        }

        let source_root = config.source_root();
        self.ensure_folder(&source_root)?;

        let destination =
            resolve_destination(&source_root, &config.default_name, config.suffix_policy)?;
        let alias = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.default_name.clone());

        println!("📦 Creating folder: {}", self.display(&destination));
        copy_tree(&config.template_dir, &destination)?;
        info!(
            "Copied template {} to {}",
            config.template_dir.display(),
            destination.display()
        );

        let mut rewritten_files = 0;
        if alias != TEMPLATE_ALIAS {
            println!("🔧 Fixing internal imports to use @/{}/", alias);
            rewritten_files = rewrite_alias_references(&destination, TEMPLATE_ALIAS, &alias)?;
            info!("Rewrote imports in {} files", rewritten_files);
        }

        for dir in route_dirs(&source_root) {
            self.ensure_folder(&dir)?;
        }
        let route_files = emit_route_files(&source_root, &alias)?;

        println!("✅ {} installed successfully!", config.default_name);

        Ok(InstallReport {
            destination,
            alias,
            rewritten_files,
            route_files,
        })
    }

    fn ensure_folder(&self, folder: &Path) -> Result<()> {
        if folder.try_exists().io_context("probe", folder)? {
            return Ok(());
        }
        fs::create_dir_all(folder).io_context("create folder", folder)?;
        println!("ℹ️ Created folder: {}", self.display(folder));
        Ok(())
    }

    /// Path relative to the project root when possible
    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.config.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
