#![forbid(unsafe_code)]

mod ascii;
mod cli;
mod logging;
mod script;

use std::error::Error;

use clap::Parser;
use contour_geom::Vec2;
use contour_map::Map;

use cli::Args;
use script::ScriptConfig;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let mut script = match &args.config {
        Some(path) => ScriptConfig::load(path)?,
        None => ScriptConfig::default(),
    };
    args.apply_overrides(&mut script);
    script.validate()?;

    let mut map = Map::new(&script.map)?;
    for edit in &script.edits {
        let (fill, radius, kind) = script.brush.resolve(edit);
        let report = map.edit(Vec2::new(edit.x, edit.y), fill, radius, kind);
        log::info!(
            target: "edit",
            "({:.3}, {:.3}) -> cell {:?}: {:?} {:?} r={} changed={} rebuilt={}",
            edit.x,
            edit.y,
            report.center,
            kind,
            fill,
            radius,
            report.cells_changed,
            report.chunks_rebuilt
        );
    }

    println!(
        "chunks={} cells={}x{} filled={} vertices={} triangles={}",
        map.chunk_count(),
        map.total_cells(),
        map.total_cells(),
        map.filled_count(),
        map.vertex_count(),
        map.triangle_count()
    );

    if args.ascii {
        print!("{}", ascii::render(&map));
    }

    if args.validate {
        let report = map.validate_seams();
        println!(
            "seams: edges={} open={} overlapping={}",
            report.edges_checked,
            report.open_edges.len(),
            report.overlapping_edges.len()
        );
        if !report.is_watertight() {
            return Err("mesh has open or overlapping seam edges".into());
        }
    }
    Ok(())
}
