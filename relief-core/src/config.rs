//! Configuration for solid mesh generation and export.

use serde::{Deserialize, Serialize};

use crate::decimate::{DEFAULT_VERTEX_CAP, MAX_MAX_DIM, MIN_MAX_DIM};
use crate::error::ConfigError;

/// Exaggeration range offered to users.
pub const MIN_EXAGGERATION: f64 = 0.1;
pub const MAX_EXAGGERATION: f64 = 20.0;

/// Configuration consumed by [`build_solid_geometry`](crate::build_solid_geometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Vertical scale applied to elevations. Horizontal coordinates are untouched.
    pub exaggeration: f64,

    /// Distance in metres between the lowest sampled point and the flat base.
    ///
    /// Zero is accepted, but the base then touches the surface minimum and the
    /// wall segments at that height have zero area.
    pub base_thickness: f64,

    /// Cap on the decimated length of either grid axis.
    pub max_dim: usize,

    /// Best-effort ceiling on emitted vertices (top + bottom).
    pub vertex_cap: usize,

    /// Unit the exported mesh is expressed in.
    pub unit: ExportUnit,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            exaggeration: 1.0,
            base_thickness: 100.0,
            max_dim: 600,
            vertex_cap: DEFAULT_VERTEX_CAP,
            unit: ExportUnit::Millimeters,
        }
    }
}

impl MeshConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RELIEF_EXAGGERATION") {
            if let Ok(v) = val.parse() {
                config.exaggeration = v;
            }
        }

        if let Ok(val) = std::env::var("RELIEF_BASE_THICKNESS") {
            if let Ok(v) = val.parse() {
                config.base_thickness = v;
            }
        }

        if let Ok(val) = std::env::var("RELIEF_MAX_DIM") {
            if let Ok(v) = val.parse() {
                config.max_dim = v;
            }
        }

        if let Ok(val) = std::env::var("RELIEF_VERTEX_CAP") {
            if let Ok(v) = val.parse() {
                config.vertex_cap = v;
            }
        }

        if let Ok(val) = std::env::var("RELIEF_UNIT") {
            config.unit = ExportUnit::from_str(&val);
        }

        config
    }

    /// Copy with every user-facing value pulled into its supported range.
    pub fn clamped(&self) -> Self {
        let exaggeration = if self.exaggeration.is_finite() {
            self.exaggeration.clamp(MIN_EXAGGERATION, MAX_EXAGGERATION)
        } else {
            1.0
        };
        let base_thickness = if self.base_thickness.is_finite() {
            self.base_thickness.max(0.0)
        } else {
            0.0
        };

        Self {
            exaggeration,
            base_thickness,
            max_dim: self.max_dim.clamp(MIN_MAX_DIM, MAX_MAX_DIM),
            vertex_cap: self.vertex_cap.max(2),
            unit: self.unit,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exaggeration.is_finite() || self.exaggeration <= 0.0 {
            return Err(ConfigError::InvalidExaggeration(self.exaggeration));
        }

        if !self.base_thickness.is_finite() || self.base_thickness < 0.0 {
            return Err(ConfigError::InvalidBaseThickness(self.base_thickness));
        }

        if !(MIN_MAX_DIM..=MAX_MAX_DIM).contains(&self.max_dim) {
            return Err(ConfigError::MaxDimOutOfRange {
                value: self.max_dim,
                min: MIN_MAX_DIM,
                max: MAX_MAX_DIM,
            });
        }

        if self.vertex_cap < 2 {
            return Err(ConfigError::InvalidVertexCap(self.vertex_cap));
        }

        Ok(())
    }
}

/// Length unit of an exported mesh. Meshes are built in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExportUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "m")]
    Meters,
}

impl ExportUnit {
    /// Parse from string (case-insensitive). Unknown values fall back to millimetres.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Self::Meters,
            _ => Self::Millimeters,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Meters => "m",
        }
    }

    /// Multiplier converting metres into this unit.
    pub fn scale_factor(&self) -> f32 {
        match self {
            Self::Millimeters => 1000.0,
            Self::Meters => 1.0,
        }
    }
}

impl std::fmt::Display for ExportUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MeshConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = MeshConfig {
            exaggeration: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidExaggeration(0.0)));

        let config = MeshConfig {
            base_thickness: -5.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBaseThickness(-5.0)));

        let config = MeshConfig {
            max_dim: 5000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxDimOutOfRange { value: 5000, .. })
        ));
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let config = MeshConfig {
            exaggeration: 100.0,
            base_thickness: -3.0,
            max_dim: 10,
            vertex_cap: 0,
            unit: ExportUnit::Meters,
        }
        .clamped();

        assert_eq!(config.exaggeration, MAX_EXAGGERATION);
        assert_eq!(config.base_thickness, 0.0);
        assert_eq!(config.max_dim, MIN_MAX_DIM);
        assert_eq!(config.vertex_cap, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_unit_parsing() {
        assert_eq!(ExportUnit::from_str("M"), ExportUnit::Meters);
        assert_eq!(ExportUnit::from_str("mm"), ExportUnit::Millimeters);
        assert_eq!(ExportUnit::from_str("furlongs"), ExportUnit::Millimeters);
        assert_eq!(ExportUnit::Millimeters.scale_factor(), 1000.0);
        assert_eq!(ExportUnit::Meters.scale_factor(), 1.0);
    }
}
