use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::MapError;

/// Map layout: a square of `chunk_resolution`² chunks, each holding
/// `cell_resolution`² cells, spanning `size` units centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_chunk_resolution")]
    pub chunk_resolution: usize,
    #[serde(default = "default_cell_resolution")]
    pub cell_resolution: usize,
}

fn default_size() -> f32 {
    2.0
}
fn default_chunk_resolution() -> usize {
    2
}
fn default_cell_resolution() -> usize {
    8
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            chunk_resolution: default_chunk_resolution(),
            cell_resolution: default_cell_resolution(),
        }
    }
}

impl MapConfig {
    pub fn new(size: f32, chunk_resolution: usize, cell_resolution: usize) -> Self {
        Self {
            size,
            chunk_resolution,
            cell_resolution,
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.chunk_resolution == 0 {
            return Err(MapError::InvalidConfiguration(
                "chunk resolution must be at least 1",
            ));
        }
        if self.cell_resolution == 0 {
            return Err(MapError::InvalidConfiguration(
                "cell resolution must be at least 1",
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(MapError::InvalidConfiguration(
                "size must be finite and positive",
            ));
        }
        if self.spacing() <= 0.0 {
            return Err(MapError::InvalidConfiguration("cell spacing underflows"));
        }
        Ok(())
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.size / self.chunk_resolution as f32
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.chunk_size() / self.cell_resolution as f32
    }

    #[inline]
    pub fn total_cells_per_side(&self) -> usize {
        self.chunk_resolution * self.cell_resolution
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MapConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<MapConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    MapConfig::from_toml_str(&s)
}
