use std::path::PathBuf;

use clap::Parser;
use contour_edit::{FillMode, StencilKind};

use crate::script::{ScriptedEdit, ScriptConfig};

/// Build a chunked contour mesh from scripted stencil edits.
#[derive(Parser, Debug)]
#[command(name = "contour", version)]
pub struct Args {
    /// TOML file with [map], [brush] and [[edits]] sections
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Physical side length of the map
    #[arg(long)]
    pub size: Option<f32>,
    /// Chunks per side
    #[arg(long)]
    pub chunks: Option<usize>,
    /// Cells per chunk side
    #[arg(long)]
    pub cells: Option<usize>,
    /// Map-space edit point, e.g. `--edit=-0.25,0.5`; repeatable
    #[arg(long = "edit", value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub edits: Vec<(f32, f32)>,
    /// Erase instead of fill
    #[arg(long)]
    pub erase: bool,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=5))]
    pub radius: Option<u32>,
    /// square or circle
    #[arg(long)]
    pub stencil: Option<StencilKind>,
    /// Print the cell grid after all edits
    #[arg(long)]
    pub ascii: bool,
    /// Check chunk seams for holes and overlaps
    #[arg(long)]
    pub validate: bool,
    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Flags win over the script file. Points given with `--edit` run after
    /// the scripted ones.
    pub fn apply_overrides(&self, script: &mut ScriptConfig) {
        if let Some(size) = self.size {
            script.map.size = size;
        }
        if let Some(n) = self.chunks {
            script.map.chunk_resolution = n;
        }
        if let Some(n) = self.cells {
            script.map.cell_resolution = n;
        }
        if self.erase {
            script.brush.fill = FillMode::Erase;
        }
        if let Some(r) = self.radius {
            script.brush.radius = r;
        }
        if let Some(kind) = self.stencil {
            script.brush.stencil = kind;
        }
        script
            .edits
            .extend(self.edits.iter().map(|&(x, y)| ScriptedEdit::at(x, y)));
    }
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("edit point must be finite, got {s:?}"));
    }
    Ok((x, y))
}
