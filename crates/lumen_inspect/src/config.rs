//! # Synchronizer Configuration
//!
//! Loaded once at startup, typically from a TOML file:
//!
//! ```toml
//! world = "physics"   # omit to target the default world
//! mode = "explicit"   # "baked" (default) or "explicit"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InspectError, InspectResult};

/// Where entity labels come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Label = entity index in hex followed by the attached component types.
    #[default]
    Baked,
    /// Label = the entity's [`DebugName`](crate::DebugName), if any.
    Explicit,
}

/// Configuration of a [`LabelSynchronizer`](crate::LabelSynchronizer).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Registry name of the world to observe; `None` = default world.
    pub world: Option<String>,
    /// Label source.
    pub mode: LabelMode,
    /// Minimum number of label slots to allocate up front. The table gets
    /// the larger of this and the world's capacity.
    pub initial_capacity_hint: usize,
}

impl SyncConfig {
    /// Baked-mode configuration for the default world.
    #[must_use]
    pub fn baked() -> Self {
        Self::default()
    }

    /// Explicit-mode configuration for the default world.
    #[must_use]
    pub fn explicit() -> Self {
        Self {
            mode: LabelMode::Explicit,
            ..Self::default()
        }
    }

    /// Targets the world registered under `name`.
    #[must_use]
    pub fn with_world(mut self, name: impl Into<String>) -> Self {
        self.world = Some(name.into());
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`InspectError::ConfigParse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> InspectResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// [`InspectError::ConfigRead`] if the file cannot be read,
    /// [`InspectError::ConfigParse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> InspectResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InspectError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_baked_default_world() {
        let config = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(config, SyncConfig::baked());
        assert!(config.world.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = SyncConfig::from_toml_str(
            r#"
            world = "physics"
            mode = "explicit"
            initial_capacity_hint = 4096
            "#,
        )
        .unwrap();
        assert_eq!(config.world.as_deref(), Some("physics"));
        assert_eq!(config.mode, LabelMode::Explicit);
        assert_eq!(config.initial_capacity_hint, 4096);
        assert_eq!(
            SyncConfig {
                initial_capacity_hint: 4096,
                ..SyncConfig::explicit().with_world("physics")
            },
            config
        );
    }

    #[test]
    fn test_rejects_unknown_mode_and_keys() {
        assert!(matches!(
            SyncConfig::from_toml_str(r#"mode = "sideways""#),
            Err(InspectError::ConfigParse(_))
        ));
        assert!(matches!(
            SyncConfig::from_toml_str("bake_components = true"),
            Err(InspectError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("lumen_inspect_no_such_config.toml");
        match SyncConfig::from_file(&path) {
            Err(InspectError::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected ConfigRead, got {other:?}"),
        }
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let text = toml::to_string(&SyncConfig::explicit().with_world("ui")).unwrap();
        assert_eq!(SyncConfig::from_toml_str(&text).unwrap().world.as_deref(), Some("ui"));
    }
}
