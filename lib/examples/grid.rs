use anyhow::{Context, Result};
use scan_tiler::{
    crop_page, draw_grid, fit, load_page, scan_grid, TilerParams, GRID_COLOR, GRID_WIDTH,
};
use std::time::Instant;

fn run() -> Result<()> {
    let path = std::env::args().nth(1).expect("Usage: grid SCAN [RESOLUTION]");
    let resolution = match std::env::args().nth(2) {
        Some(res) => res.parse().context("Resolution must be a number")?,
        None => 256,
    };
    let params = TilerParams::new(resolution)?;
    eprintln!("read image from {}", path);
    let scan = load_page(&path).with_context(|| format!("Failed to open {}", path))?;

    let t0 = Instant::now();
    let page = crop_page(&scan, params.margin)?;
    let grid = scan_grid(&page, &params.scan_params());
    eprintln!("scan took {:?}", t0.elapsed());

    for (i, pair) in grid.columns.windows(2).enumerate() {
        eprintln!("  Col {}: {},{} {}", i, pair[0], pair[1], pair[1] - pair[0]);
    }
    for (i, pair) in grid.rows.windows(2).enumerate() {
        eprintln!("  Row {}: {},{} {}", i, pair[0], pair[1], pair[1] - pair[0]);
    }
    for cell in grid.cells() {
        match fit(&page, &cell, params.default_threshold) {
            Some(b) => eprintln!("  {:?} -> {:?}", cell, b),
            None => eprintln!("  {:?} blank", cell),
        }
    }

    draw_grid(&page, &grid, GRID_COLOR, GRID_WIDTH).save("grid.png")?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:?}", err);
    }
}
