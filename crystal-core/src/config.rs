//! Scene configuration
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes:
//!
//! ```toml
//! idle_spin = 0.002
//!
//! [pointer]
//! duration_secs = 0.8
//! ease = "linear"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::lighting::{AmbientLight, Material, PointLight};

/// Top-level scene configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub crystal: CrystalConfig,
    pub camera: CameraConfig,
    pub ambient_light: AmbientLight,
    pub point_light: PointLight,
    pub pointer: PointerConfig,
    pub page: PageConfig,
    /// Rotation added to the crystal's x and y angles every frame (radians)
    pub idle_spin: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            crystal: CrystalConfig::default(),
            camera: CameraConfig::default(),
            ambient_light: AmbientLight::default(),
            point_light: PointLight::default(),
            pointer: PointerConfig::default(),
            page: PageConfig::default(),
            idle_spin: 0.001,
        }
    }
}

/// The wireframe shape
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrystalConfig {
    pub radius: f32,
    pub material: Material,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            material: Material::default(),
        }
    }
}

/// Perspective camera settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 5.0],
        }
    }
}

/// How pointer movement maps onto tweens
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Crystal rotation (radians) per unit of normalized pointer offset
    pub rotation_scale: f32,
    /// Camera offset per unit of normalized pointer offset
    pub camera_scale: f32,
    pub duration_secs: f32,
    pub ease: Easing,
}

impl PointerConfig {
    /// Tween length, saturating at `Duration::MAX`
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.duration_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    fn validate(&self) -> Result<()> {
        let secs = self.duration_secs;
        if !secs.is_finite() || secs < 0.0 {
            return Err(Error::InvalidConfig {
                field: "pointer.duration_secs",
                reason: format!("{secs} is not a finite, non-negative number of seconds"),
            });
        }
        if Duration::try_from_secs_f32(secs).is_err() {
            return Err(Error::InvalidConfig {
                field: "pointer.duration_secs",
                reason: format!("{secs} seconds is too long"),
            });
        }
        Ok(())
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            rotation_scale: 0.5,
            camera_scale: 0.2,
            duration_secs: 1.5,
            ease: Easing::Power2Out,
        }
    }
}

/// Page integration used by the browser host
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageConfig {
    /// Id of the element the canvas is appended to
    pub container_id: String,
    /// Selector for sections revealed on scroll
    pub sections: String,
    /// Class added to a section once it has been revealed
    pub visible_class: String,
    /// Fraction of a section that must be in view to reveal it
    pub threshold: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container_id: "webgl-container".to_string(),
            sections: ".content-section, #hero".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.1,
        }
    }
}

impl SceneConfig {
    /// Load a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but would break the scene at runtime
    pub fn validate(&self) -> Result<()> {
        if !self.idle_spin.is_finite() {
            return Err(Error::InvalidConfig {
                field: "idle_spin",
                reason: format!("{} is not a finite angle", self.idle_spin),
            });
        }
        self.pointer.validate()
    }
}
