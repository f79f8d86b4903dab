use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use contour_edit::{FillMode, StencilKind};
use contour_map::MapConfig;
use serde::Deserialize;

/// Largest brush radius the editor exposes.
pub const MAX_RADIUS: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ScriptConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub brush: Brush,
    #[serde(default)]
    pub edits: Vec<ScriptedEdit>,
}

/// Stencil settings shared by every edit that doesn't override them.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Brush {
    #[serde(default)]
    pub fill: FillMode,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default)]
    pub stencil: StencilKind,
}

fn default_radius() -> u32 {
    1
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            fill: FillMode::default(),
            radius: default_radius(),
            stencil: StencilKind::default(),
        }
    }
}

impl Brush {
    pub fn resolve(&self, edit: &ScriptedEdit) -> (FillMode, u32, StencilKind) {
        (
            edit.fill.unwrap_or(self.fill),
            edit.radius.unwrap_or(self.radius),
            edit.stencil.unwrap_or(self.stencil),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ScriptedEdit {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub fill: Option<FillMode>,
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub stencil: Option<StencilKind>,
}

impl ScriptedEdit {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            fill: None,
            radius: None,
            stencil: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    RadiusOutOfRange { edit: Option<usize>, radius: u32 },
    NonFinitePoint { edit: usize },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::RadiusOutOfRange { edit: None, radius } => {
                write!(f, "brush radius {} is outside 0..={}", radius, MAX_RADIUS)
            }
            ScriptError::RadiusOutOfRange {
                edit: Some(i),
                radius,
            } => write!(f, "edit #{} radius {} is outside 0..={}", i, radius, MAX_RADIUS),
            ScriptError::NonFinitePoint { edit } => {
                write!(f, "edit #{} has a non-finite point", edit)
            }
        }
    }
}

impl Error for ScriptError {}

impl ScriptConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let script = Self::from_toml_str(&s)?;
        log::info!(
            target: "config",
            "loaded {} with {} edits",
            path.display(),
            script.edits.len()
        );
        Ok(script)
    }

    /// Map layout is checked by `Map::new`; this covers the edit list.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.brush.radius > MAX_RADIUS {
            return Err(ScriptError::RadiusOutOfRange {
                edit: None,
                radius: self.brush.radius,
            });
        }
        for (i, edit) in self.edits.iter().enumerate() {
            if let Some(radius) = edit.radius.filter(|&r| r > MAX_RADIUS) {
                return Err(ScriptError::RadiusOutOfRange {
                    edit: Some(i),
                    radius,
                });
            }
            if !edit.x.is_finite() || !edit.y.is_finite() {
                return Err(ScriptError::NonFinitePoint { edit: i });
            }
        }
        Ok(())
    }
}
