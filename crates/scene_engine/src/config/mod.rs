//! Configuration system
//!
//! Scene behavior that the runtime leaves open (how strictly frame phases
//! are ordered, what happens when a system meets a component it has no
//! handler for) is selected here rather than hard-coded.

use std::collections::HashSet;
use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// How out-of-order frame phases are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Reject the call with `SceneError::OrderingViolation`
    #[default]
    Strict,
    /// Log a warning and run anyway; derived matrices may be stale
    Relaxed,
}

/// What a traversal does when a system has no handler for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Skip the component silently
    #[default]
    Ignore,
    /// Skip the component and log a warning once per traversal
    Warn,
    /// Abort the traversal with `SceneError::UnsupportedDispatch`
    Error,
}

impl DispatchPolicy {
    /// Map the result of one dispatch through this policy.
    ///
    /// Returns `Ok(true)` when the system handled the component and
    /// `Ok(false)` when a missing handler was skipped. Under `Warn`, each
    /// component type is logged once per `warned` set.
    pub fn apply(
        self,
        system: &str,
        result: SceneResult<()>,
        warned: &mut HashSet<&'static str>,
    ) -> SceneResult<bool> {
        match result {
            Ok(()) => Ok(true),
            Err(SceneError::UnsupportedDispatch { component, .. }) => match self {
                Self::Ignore => Ok(false),
                Self::Warn => {
                    if warned.insert(component) {
                        log::warn!("{} has no handler for {}, skipping", system, component);
                    }
                    Ok(false)
                }
                Self::Error => Err(SceneError::unsupported(system, component)),
            },
            Err(other) => Err(other),
        }
    }
}

/// Scene runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name given to the world's root entity
    pub root_name: String,

    /// Frame phase ordering enforcement
    pub frame_ordering: OrderingPolicy,

    /// Handling of components a system cannot visit
    pub unsupported_dispatch: DispatchPolicy,

    /// Debug-log the entity tree when the scene initializes
    pub log_tree_on_init: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            root_name: "root".to_string(),
            frame_ordering: OrderingPolicy::Strict,
            unsupported_dispatch: DispatchPolicy::Ignore,
            log_tree_on_init: false,
        }
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_policy_maps_missing_handler() {
        let miss = || Err(SceneError::unsupported("Recorder", "Light"));
        let mut warned = HashSet::new();

        assert_eq!(DispatchPolicy::Ignore.apply("Sys", miss(), &mut warned), Ok(false));
        assert_eq!(DispatchPolicy::Warn.apply("Sys", miss(), &mut warned), Ok(false));
        assert!(warned.contains("Light"));
        assert_eq!(
            DispatchPolicy::Error.apply("Sys", miss(), &mut warned),
            Err(SceneError::unsupported("Sys", "Light"))
        );
        assert_eq!(DispatchPolicy::Error.apply("Sys", Ok(()), &mut warned), Ok(true));
        assert_eq!(
            DispatchPolicy::Ignore.apply("Sys", Err(SceneError::RootRemoval), &mut warned),
            Err(SceneError::RootRemoval)
        );
    }

    fn temp_path(file_name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scene_engine_{}_{}", std::process::id(), file_name))
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SceneConfig {
            root_name: "world".to_string(),
            frame_ordering: OrderingPolicy::Relaxed,
            unsupported_dispatch: DispatchPolicy::Warn,
            log_tree_on_init: true,
        };
        let path = temp_path("roundtrip.toml");

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = SceneConfig {
            unsupported_dispatch: DispatchPolicy::Error,
            ..Default::default()
        };
        let path = temp_path("roundtrip.ron");

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SceneConfig = toml::from_str("frame_ordering = \"relaxed\"").unwrap();

        assert_eq!(config.frame_ordering, OrderingPolicy::Relaxed);
        assert_eq!(config.root_name, "root");
        assert_eq!(config.unsupported_dispatch, DispatchPolicy::Ignore);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::default().save_to_file(temp_path("config.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
