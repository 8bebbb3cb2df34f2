//! Configuration file support for schemeport.
//!
//! Two configuration file locations are read:
//! - Global: `~/.schemeport/config.toml` - User-wide defaults
//! - Project: `.schemeport/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [compile]
//! out_dir = "target/schemeport"
//! declarations = ["Schemes.toml", "modules/*/Schemes.toml"]
//!
//! [[resolve.roots]]
//! path = "target/schemeport"
//!
//! [[resolve.roots]]
//! path = "vendor/transports/out"
//! priority = 200
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::compiler::DECLARATION_FILE;
use crate::sources::set::DEFAULT_PRIORITY;

/// Name of the per-project and per-user configuration directory.
pub const CONFIG_DIR: &str = ".schemeport";

/// schemeport configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registration compiler settings
    pub compile: CompileConfig,

    /// Manifest lookup settings
    pub resolve: ResolveConfig,
}

/// Registration compiler settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Build output directory manifests are written below
    pub out_dir: Option<PathBuf>,

    /// Glob patterns of declaration files
    pub declarations: Vec<String>,
}

/// Manifest lookup settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Build output directories to read manifests from
    pub roots: Vec<RootConfig>,
}

/// One build output directory contributing manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    pub path: PathBuf,

    /// Lower is read earlier
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.compile.out_dir.is_some() {
            self.compile.out_dir = other.compile.out_dir;
        }
        if !other.compile.declarations.is_empty() {
            self.compile.declarations = other.compile.declarations;
        }

        if !other.resolve.roots.is_empty() {
            self.resolve.roots = other.resolve.roots;
        }
    }

    /// Declaration file patterns, defaulting to `Schemes.toml`.
    pub fn declaration_patterns(&self) -> Vec<String> {
        if self.compile.declarations.is_empty() {
            vec![DECLARATION_FILE.to_string()]
        } else {
            self.compile.declarations.clone()
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.schemeport/config.toml)
/// 2. Global config (~/.schemeport/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.schemeport).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|d| d.join("config.toml"))
}

/// Get the project config file path.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.compile.out_dir.is_none());
        assert!(config.resolve.roots.is_empty());
        assert_eq!(config.declaration_patterns(), vec!["Schemes.toml"]);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[compile]
out_dir = "out"
declarations = ["modules/*/Schemes.toml"]

[[resolve.roots]]
path = "out"

[[resolve.roots]]
path = "vendor/out"
priority = 5
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.compile.out_dir, Some(PathBuf::from("out")));
        assert_eq!(config.declaration_patterns(), vec!["modules/*/Schemes.toml"]);
        assert_eq!(
            config.resolve.roots,
            vec![
                RootConfig {
                    path: PathBuf::from("out"),
                    priority: 100,
                },
                RootConfig {
                    path: PathBuf::from("vendor/out"),
                    priority: 5,
                },
            ]
        );
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.compile.out_dir = Some(PathBuf::from("global-out"));
        base.compile.declarations = vec!["a.toml".to_string()];

        let mut override_cfg = Config::default();
        override_cfg.compile.out_dir = Some(PathBuf::from("project-out"));

        base.merge(override_cfg);

        assert_eq!(base.compile.out_dir, Some(PathBuf::from("project-out")));
        assert_eq!(base.compile.declarations, vec!["a.toml"]); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(&global, "[compile]\nout_dir = \"g\"\ndeclarations = [\"g.toml\"]\n").unwrap();
        std::fs::write(&project, "[compile]\nout_dir = \"p\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.compile.out_dir, Some(PathBuf::from("p")));
        assert_eq!(config.compile.declarations, vec!["g.toml"]);
    }

    #[test]
    fn test_broken_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[compile\n").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.compile.out_dir.is_none());
    }
}
