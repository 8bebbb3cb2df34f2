//! Global context for schemeport operations.
//!
//! Provides centralized access to configuration, paths, and output flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::sources::{PathSource, SourceSet};
use crate::util::config::{self, Config};

/// Output directory used when neither the command line nor the config names one.
pub const DEFAULT_OUT_DIR: &str = "target/schemeport";

/// Shared state for CLI operations.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Merged global and project configuration
    config: Config,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a context for the current directory, loading its configuration.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context for a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let global = config::global_config_path();
        let config = config::load_config(global.as_deref(), &config::project_config_path(&cwd));
        GlobalContext {
            cwd,
            config,
            verbose: false,
            color: true,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a possibly relative path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Build output directory: explicit override, then config, then default.
    pub fn out_dir(&self, explicit: Option<&Path>) -> PathBuf {
        let dir = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.compile.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        self.resolve_path(&dir)
    }

    /// Manifest sources for lookups.
    ///
    /// Explicit roots are read in the order given. Without any, the
    /// configured roots are used, falling back to the build output
    /// directory alone.
    pub fn source_set(&self, explicit_roots: &[PathBuf]) -> SourceSet {
        let mut set = SourceSet::new();

        if !explicit_roots.is_empty() {
            for root in explicit_roots {
                set.add(Box::new(PathSource::new(self.resolve_path(root))));
            }
        } else if !self.config.resolve.roots.is_empty() {
            for root in &self.config.resolve.roots {
                set.add_with_priority(
                    Box::new(PathSource::new(self.resolve_path(&root.path))),
                    root.priority,
                );
            }
        } else {
            set.add(Box::new(PathSource::new(self.out_dir(None))));
        }

        set
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::RootConfig;
    use tempfile::TempDir;

    #[test]
    fn test_out_dir_precedence() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config(Config::default());
        assert_eq!(ctx.out_dir(None), tmp.path().join(DEFAULT_OUT_DIR));

        let mut config = Config::default();
        config.compile.out_dir = Some(PathBuf::from("configured"));
        let ctx = ctx.with_config(config);
        assert_eq!(ctx.out_dir(None), tmp.path().join("configured"));
        assert_eq!(
            ctx.out_dir(Some(Path::new("explicit"))),
            tmp.path().join("explicit")
        );
    }

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let config_path = config::project_config_path(tmp.path());
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "[compile]\nout_dir = \"from-project\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.out_dir(None), tmp.path().join("from-project"));
    }

    #[test]
    fn test_source_set_from_config_roots() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.resolve.roots = vec![
            RootConfig {
                path: PathBuf::from("late"),
                priority: 200,
            },
            RootConfig {
                path: PathBuf::from("early"),
                priority: 1,
            },
        ];
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config(config);

        let names = ctx.source_set(&[]).names();
        assert_eq!(
            names,
            vec![
                tmp.path().join("early").display().to_string(),
                tmp.path().join("late").display().to_string(),
            ]
        );
    }
}
