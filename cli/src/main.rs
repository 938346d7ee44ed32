use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rayon::prelude::*;
use scan_tiler::{
    load_page, orient, page_number, parse_color, save_grid, save_tiles, tile_page, to_alpha,
    Orientation, TilerParams, RESOLUTIONS,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Cut scanned pages of drawings into square tiles
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of worker threads, defaults to the number of cores
    #[arg(short, long, global = true)]
    jobs: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the grid on every page and save one tile per drawing
    Tile {
        /// Input folder with one image per page
        dir_in: PathBuf,
        /// Resolution of the square tiles. 256px <=> dpi300
        #[arg(value_parser = parse_resolution)]
        resolution: u32,
        /// Output folder, gets one subfolder per page
        #[arg(long, default_value = "tile")]
        dir_out: PathBuf,
        /// Output folder for the pages with the detected grid drawn in
        #[arg(long, default_value = "grid")]
        dir_out_grid: PathBuf,
        /// Pixels cropped from every side of the paper
        #[arg(long, default_value_t = 40)]
        margin: u32,
        /// False flag threshold used while fitting boxes to drawings
        #[arg(long, default_value_t = 10)]
        threshold: u32,
    },
    /// Multiply the tiles in every page subfolder by 8 rotations and flips
    Rotateflip {
        /// Folder of page subfolders, as written by `tile`
        #[arg(default_value = "tile")]
        dir_in: PathBuf,
    },
    /// Convert tiles to transparent images: white becomes clear, black becomes `color`
    Rgba {
        /// Input folder of tiles
        dir_in: PathBuf,
        /// Color of the ink
        #[arg(long, default_value = "#000000")]
        color: String,
    },
}

fn parse_resolution(s: &str) -> Result<u32, String> {
    let res: u32 = s.parse().map_err(|_| format!("{} is not a number", s))?;
    TilerParams::new(res)
        .map(|_| res)
        .map_err(|_| format!("resolution must be one of {:?}", RESOLUTIONS))
}

/// All regular files in `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Run `work` on every item in parallel. Failures are logged and counted, they never stop the batch.
fn run_parallel<F>(items: &[PathBuf], jobs: Option<usize>, work: F) -> Result<usize>
where
    F: Fn(&Path) -> Result<usize> + Sync,
{
    let run = || {
        items
            .par_iter()
            .map(|item| match work(item) {
                Ok(n) => {
                    info!("{}: {} images", item.display(), n);
                    true
                }
                Err(err) => {
                    warn!("{}: {:?}", item.display(), err);
                    false
                }
            })
            .filter(|ok| !ok)
            .count()
    };
    let failed = match jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(run),
        None => run(),
    };
    Ok(failed)
}

fn tile_one(path: &Path, params: &TilerParams, dir_out: &Path, dir_out_grid: &Path) -> Result<usize> {
    let page = page_number(path);
    let scan = load_page(path)?;
    let result = tile_page(&scan, params)?;
    let file_name = path
        .file_name()
        .with_context(|| format!("No file name in {}", path.display()))?;
    save_grid(&result, dir_out_grid.join(file_name))?;
    let saved = save_tiles(&result, &page, dir_out)?;
    Ok(saved.len())
}

/// Replace every tile in `dir` by its 8 orientations, `<tile>_rf00.png` .. `<tile>_rf13.png`.
fn rotateflip_page(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for path in list_files(dir)? {
        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        if stem.contains("_rf") {
            continue;
        }
        let tile = load_page(&path)?;
        for orientation in Orientation::all() {
            let target = dir.join(format!("{}{}.png", stem, orientation.suffix()));
            orient(&tile, orientation)
                .save(&target)
                .with_context(|| format!("Failed to save {}", target.display()))?;
            count += 1;
        }
        fs::remove_file(&path)?;
    }
    Ok(count)
}

fn rgba_one(path: &Path, color: image::Rgb<u8>, dir_out: &Path) -> Result<usize> {
    let tile = load_page(path)?;
    let file_name = path
        .file_name()
        .with_context(|| format!("No file name in {}", path.display()))?;
    let target = dir_out.join(file_name).with_extension("png");
    to_alpha(&tile, color)
        .save(&target)
        .with_context(|| format!("Failed to save {}", target.display()))?;
    Ok(1)
}

fn rgba_dir_out(dir_in: &Path, color: &str) -> PathBuf {
    let name = dir_in
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir_in.with_file_name(format!("{}_rgba_{}", name, color.trim_start_matches('#')))
}

fn run(args: Args) -> Result<()> {
    let (items, failed) = match args.command {
        Command::Tile {
            dir_in,
            resolution,
            dir_out,
            dir_out_grid,
            margin,
            threshold,
        } => {
            let params = TilerParams::new(resolution)?
                .with_margin(margin)
                .with_threshold(threshold);
            fs::create_dir_all(&dir_out_grid)?;
            fs::create_dir_all(&dir_out)?;
            let pages = list_files(&dir_in)?;
            info!("{} pages, tiles of {}px", pages.len(), params.resolution);
            let failed = run_parallel(&pages, args.jobs, |path| {
                tile_one(path, &params, &dir_out, &dir_out_grid)
            })?;
            (pages.len(), failed)
        }
        Command::Rotateflip { dir_in } => {
            let pages = list_dirs(&dir_in)?;
            let failed = run_parallel(&pages, args.jobs, rotateflip_page)?;
            (pages.len(), failed)
        }
        Command::Rgba { dir_in, color } => {
            let rgb = parse_color(&color)?;
            let dir_out = rgba_dir_out(&dir_in, &color);
            fs::create_dir_all(&dir_out)?;
            let tiles = list_files(&dir_in)?;
            let failed = run_parallel(&tiles, args.jobs, |path| rgba_one(path, rgb, &dir_out))?;
            (tiles.len(), failed)
        }
    };
    if failed > 0 {
        bail!("{} of {} inputs failed", failed, items);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn page_with_squares(positions: &[(u32, u32)]) -> RgbImage {
        RgbImage::from_fn(1000, 700, |x, y| {
            let ink = positions
                .iter()
                .any(|&(px, py)| x >= px && x < px + 200 && y >= py && y < py + 200);
            if ink {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("512"), Ok(512));
        assert!(parse_resolution("500").is_err());
        assert!(parse_resolution("x").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(&["scan-tiler", "-j", "2", "tile", "scans", "1024"]).unwrap();
        assert_eq!(args.jobs, Some(2));
        match args.command {
            Command::Tile {
                resolution,
                dir_out,
                margin,
                ..
            } => {
                assert_eq!(resolution, 1024);
                assert_eq!(dir_out, PathBuf::from("tile"));
                assert_eq!(margin, 40);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(&["scan-tiler", "tile", "scans", "300"]).is_err());
    }

    #[test]
    fn test_tile_batch_isolates_failures() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dir_in = dir.path().join("scans");
        fs::create_dir_all(&dir_in)?;
        page_with_squares(&[(200, 200), (600, 200)]).save(dir_in.join("1.png"))?;
        // an all black page has no paper border
        RgbImage::from_pixel(300, 300, Rgb([0, 0, 0])).save(dir_in.join("2.png"))?;
        fs::write(dir_in.join("3.png"), b"not an image")?;

        let dir_out = dir.path().join("tile");
        let dir_grid = dir.path().join("grid");
        let args = Args::try_parse_from(&[
            "scan-tiler",
            "tile",
            dir_in.to_str().unwrap(),
            "256",
            "--dir-out",
            dir_out.to_str().unwrap(),
            "--dir-out-grid",
            dir_grid.to_str().unwrap(),
        ])?;
        let err = run(args).unwrap_err();
        assert_eq!(err.to_string(), "2 of 3 inputs failed");
        assert!(dir_out.join("p1/p1_t00.png").is_file());
        assert!(dir_out.join("p1/p1_t01.png").is_file());
        assert!(dir_grid.join("1.png").is_file());
        Ok(())
    }

    #[test]
    fn test_rotateflip_and_rgba() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let page_dir = dir.path().join("tile").join("p1");
        fs::create_dir_all(&page_dir)?;
        RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])).save(page_dir.join("p1_t00.png"))?;

        assert_eq!(rotateflip_page(&page_dir)?, 8);
        let files = list_files(&page_dir)?;
        assert_eq!(files.len(), 8);
        assert!(page_dir.join("p1_t00_rf00.png").is_file());
        assert!(page_dir.join("p1_t00_rf13.png").is_file());
        // a second run leaves multiplied tiles alone
        assert_eq!(rotateflip_page(&page_dir)?, 0);

        let dir_out = rgba_dir_out(&page_dir, "#ff0000");
        assert_eq!(dir_out, dir.path().join("tile").join("p1_rgba_ff0000"));
        fs::create_dir_all(&dir_out)?;
        rgba_one(&files[0], Rgb([255, 0, 0]), &dir_out)?;
        let rgba = image::open(dir_out.join(files[0].file_name().unwrap()))?.into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0), &image::Rgba([255, 0, 0, 0]));
        Ok(())
    }
}
