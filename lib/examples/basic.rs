use anyhow::Result;
use scan_tiler::{load_page, tile_page, TilerParams};

fn main() -> Result<()> {
    let path = "scans/017.png";
    let scan = load_page(path)?;
    let result = tile_page(&scan, &TilerParams::new(256)?)?;
    for tile in result.tiles.iter() {
        println!("t{:02}: {:?}", tile.index, tile.bounds);
    }
    Ok(())
}
