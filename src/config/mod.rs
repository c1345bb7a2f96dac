//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section               | Purpose                                        |
//! |-----------------------|------------------------------------------------|
//! | `[build]`             | Content/temp/output paths, permalinks, headers |
//! | `[locales."<prefix>"]`| Locale path prefixes and their language        |
//! | `[frontmatter]`       | Front matter defaults for every page           |
//!
//! A missing config file is not an error: every section has defaults and
//! the site root falls back to the current directory.

mod build;
mod error;
mod util;

pub use build::{BuildConfig, STDOUT};
pub use error::ConfigError;
pub use util::{find_config_file, find_config_file_from};

use crate::{
    cli::{Cli, Commands},
    core::Locales,
    debug, log,
    page::Frontmatter,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Locales keyed by path prefix
    #[serde(default)]
    pub locales: Locales,

    /// Front matter defaults
    #[serde(default)]
    pub frontmatter: Frontmatter,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is
    /// the config file's parent directory, or cwd when there is none.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                debug!("config"; "loaded {}", path.display());
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute content directory.
    pub fn content_dir(&self) -> PathBuf {
        self.root_join(&self.build.content)
    }

    /// Absolute temp directory.
    pub fn temp_dir(&self) -> PathBuf {
        self.root_join(&self.build.temp)
    }

    /// Absolute output file, `None` when writing to stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        (!self.build.is_stdout()).then(|| self.root_join(&self.build.output))
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { pre_render, .. } => {
                if *pre_render {
                    self.build.pre_render = true;
                }
            }
            Commands::Inspect { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate header levels and locale prefixes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build.header_levels()?;

        for prefix in self.locales.prefixes() {
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "locale prefix `{prefix}` must start and end with `/`"
                )));
            }
        }

        if let Some(pattern) = &self.build.permalink
            && pattern.trim().is_empty()
        {
            return Err(ConfigError::Validation("build.permalink is empty".into()));
        }

        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
