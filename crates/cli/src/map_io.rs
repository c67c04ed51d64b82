//! Map images and world files on disk.
//!
//! Layout next to an image `dir/<stem>.<ext>`:
//! - `dir/<stem>.map.<ext>`: optional cleaned-up occupancy image; preferred over the
//!   image itself when present.
//! - `dir/<stem>.wf`, else `dir/_.wf`: optional world file with resolution and the
//!   geographic position of the top-left pixel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bcd::{MapCfg, OccupancyMap};
use image::GrayImage;
use serde::Serialize;

/// Georeferencing read from a world file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldFile {
    pub x_resolution: f64,
    pub y_resolution: f64,
    pub upper_left_latitude: f64,
    pub upper_left_longitude: f64,
}

#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub map: OccupancyMap,
    /// Image the occupancy grid was read from.
    pub source: PathBuf,
    pub world: Option<WorldFile>,
}

/// `<stem>.map.<ext>` next to `image` if it exists, else `image`.
pub fn map_image_path(image: &Path) -> PathBuf {
    let (Some(stem), Some(ext)) = (image.file_stem(), image.extension()) else {
        return image.to_path_buf();
    };
    let mut name = stem.to_os_string();
    name.push(".map.");
    name.push(ext);
    let candidate = image.with_file_name(name);
    if candidate.is_file() {
        candidate
    } else {
        image.to_path_buf()
    }
}

/// `<stem>.wf` next to `image`, falling back to `_.wf` in the same directory.
pub fn world_file_path(image: &Path) -> Option<PathBuf> {
    let stem = image.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".wf");
    [image.with_file_name(name), image.with_file_name("_.wf")]
        .into_iter()
        .find(|p| p.is_file())
}

/// Parse `Key: value` lines. All four keys are required; other lines are ignored.
pub fn parse_world_file(text: &str) -> Result<WorldFile> {
    const KEYS: [&str; 4] = [
        "X Resolution:",
        "Y Resolution:",
        "Upper Left Latitude:",
        "Upper Left Longitude:",
    ];
    let mut values = [None; 4];
    for (n, line) in text.lines().enumerate() {
        for (slot, key) in values.iter_mut().zip(KEYS) {
            let Some(pos) = line.find(key) else { continue };
            let raw = line[pos + key.len()..].split_whitespace().next().unwrap_or("");
            let v: f64 = raw
                .parse()
                .with_context(|| format!("line {}: bad value {raw:?} for {key:?}", n + 1))?;
            *slot = Some(v);
        }
    }
    match values {
        [Some(x_resolution), Some(y_resolution), Some(upper_left_latitude), Some(upper_left_longitude)] => {
            Ok(WorldFile {
                x_resolution,
                y_resolution,
                upper_left_latitude,
                upper_left_longitude,
            })
        }
        _ => {
            let missing: Vec<&str> = KEYS
                .iter()
                .zip(values)
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| k.trim_end_matches(':'))
                .collect();
            bail!("world file is missing {}", missing.join(", "))
        }
    }
}

/// Threshold a greyscale image into an occupancy grid.
pub fn luma_to_map(img: &GrayImage, cfg: MapCfg) -> Result<OccupancyMap> {
    let (w, h) = img.dimensions();
    Ok(OccupancyMap::from_luma(
        w as usize,
        h as usize,
        img.as_raw(),
        cfg,
    )?)
}

/// Load the occupancy grid for `image_path` and its world file, if any.
pub fn load(image_path: &Path, cfg: MapCfg) -> Result<LoadedMap> {
    if !image_path.is_file() {
        bail!("map image {} does not exist", image_path.display());
    }
    let source = map_image_path(image_path);
    let img = image::open(&source)
        .with_context(|| format!("loading map image {}", source.display()))?
        .into_luma8();
    let map = luma_to_map(&img, cfg)?;

    let world = match world_file_path(image_path) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading world file {}", path.display()))?;
            let wf = parse_world_file(&text)
                .with_context(|| format!("parsing world file {}", path.display()))?;
            tracing::debug!(path = %path.display(), ?wf, "world file");
            Some(wf)
        }
        None => {
            tracing::warn!(image = %image_path.display(), "no world file; continuing without georeferencing");
            None
        }
    };
    Ok(LoadedMap { map, source, world })
}
