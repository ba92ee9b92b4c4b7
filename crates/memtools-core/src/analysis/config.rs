use crate::core::utils::geometry::Axis;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const DEFAULT_HEAD_ATOM: &str = "P";
const DEFAULT_SOLVENT_ATOM: &str = "OW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_head_atom() -> String {
    DEFAULT_HEAD_ATOM.to_string()
}

fn default_solvent_atom() -> String {
    DEFAULT_SOLVENT_ATOM.to_string()
}

/// Which particles define the two leaflets of a bilayer and how to split them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LayerSelection {
    /// Residue name of the lipids forming the bilayer (e.g., "POPC").
    pub residue_name: String,
    /// Atom name of the one representative head-group atom per lipid.
    #[serde(default = "default_head_atom")]
    pub head_atom: String,
    /// The bilayer normal.
    #[serde(default)]
    pub axis: Axis,
}

/// Which particles define the boundary band and which solvent atoms are tested against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BoundarySelection {
    /// Atom name of the representative atoms of both layers.
    #[serde(default = "default_head_atom")]
    pub layer_atom: String,
    /// Atom name of the one representative atom per solvent molecule.
    #[serde(default = "default_solvent_atom")]
    pub solvent_atom: String,
    /// The bilayer normal.
    #[serde(default)]
    pub axis: Axis,
}

impl Default for BoundarySelection {
    fn default() -> Self {
        Self {
            layer_atom: default_head_atom(),
            solvent_atom: default_solvent_atom(),
            axis: Axis::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AreaSettings {
    /// Number of lipids sharing the xy cross-section of the box.
    pub lipid_count: usize,
}

/// Settings for the composed bilayer operations, as read from a TOML file.
///
/// ```toml
/// [layers]
/// residue-name = "POPC"
/// head-atom = "P"
/// axis = "z"
///
/// [boundary]
/// layer-atom = "P"
/// solvent-atom = "OW"
///
/// [area]
/// lipid-count = 64
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    pub layers: Option<LayerSelection>,
    pub boundary: Option<BoundarySelection>,
    pub area: Option<AreaSettings>,
}

impl AnalysisConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading analysis configuration from '{}'", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layers) = &self.layers {
            if layers.residue_name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "layers.residue-name",
                    reason: "must not be empty".into(),
                });
            }
        }
        if let Some(area) = &self.area {
            if area.lipid_count == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "area.lipid-count",
                    reason: "must be positive".into(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct LayerSelectionBuilder {
    residue_name: Option<String>,
    head_atom: Option<String>,
    axis: Option<Axis>,
}

impl LayerSelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue_name(mut self, name: &str) -> Self {
        self.residue_name = Some(name.to_string());
        self
    }

    pub fn head_atom(mut self, name: &str) -> Self {
        self.head_atom = Some(name.to_string());
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn build(self) -> Result<LayerSelection, ConfigError> {
        Ok(LayerSelection {
            residue_name: self
                .residue_name
                .ok_or(ConfigError::MissingParameter("residue_name"))?,
            head_atom: self.head_atom.unwrap_or_else(default_head_atom),
            axis: self.axis.unwrap_or_default(),
        })
    }
}

#[derive(Default)]
pub struct BoundarySelectionBuilder {
    layer_atom: Option<String>,
    solvent_atom: Option<String>,
    axis: Option<Axis>,
}

impl BoundarySelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_atom(mut self, name: &str) -> Self {
        self.layer_atom = Some(name.to_string());
        self
    }

    pub fn solvent_atom(mut self, name: &str) -> Self {
        self.solvent_atom = Some(name.to_string());
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn build(self) -> BoundarySelection {
        BoundarySelection {
            layer_atom: self.layer_atom.unwrap_or_else(default_head_atom),
            solvent_atom: self.solvent_atom.unwrap_or_else(default_solvent_atom),
            axis: self.axis.unwrap_or_default(),
        }
    }
}
