//! Asset catalog access and background loading.
//!
//! Backgrounds are loaded through a fixed fallback chain: the exact path,
//! then the same filename under `images/` when the original lived under
//! `holidays/`, then the default sentinel. When everything fails the caller
//! paints a plain background color; nothing in here panics over a missing
//! or broken file.

use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::services::holiday::{DEFAULT_BACKGROUND, HOLIDAY_DIR};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {0} not found")]
    NotFound(String),
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode asset {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Read-only access to image assets by relative path.
pub trait AssetCatalog {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Catalog rooted at a directory on disk.
pub struct DirAssetCatalog {
    root: PathBuf,
}

impl DirAssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetCatalog for DirAssetCatalog {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let relative = Path::new(path);
        // Only plain relative components; `..` and absolute paths miss.
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(AssetError::NotFound(path.to_string()));
        }

        let full = self.root.join(relative);
        if !full.is_file() {
            return Err(AssetError::NotFound(path.to_string()));
        }
        fs::read(&full).map_err(|source| AssetError::Io {
            path: path.to_string(),
            source,
        })
    }
}

/// Decoded RGBA8 image, ready to upload as a texture.
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Loads the background for `path`, walking the fallback chain. Returns
/// `None` when every candidate fails to read or decode.
pub fn load_background(catalog: &dyn AssetCatalog, path: &str) -> Option<Bitmap> {
    for candidate in fallback_candidates(path) {
        match load_bitmap(catalog, &candidate) {
            Ok(bitmap) => {
                if candidate != path {
                    log::info!("background {} unavailable, using {}", path, candidate);
                }
                return Some(bitmap);
            }
            Err(AssetError::NotFound(_)) => {}
            Err(err) => log::warn!("{}", err),
        }
    }
    log::warn!("no usable background for {}; painting a plain color", path);
    None
}

fn load_bitmap(catalog: &dyn AssetCatalog, path: &str) -> Result<Bitmap, AssetError> {
    let bytes = catalog.read(path)?;
    decode_png(&bytes).map_err(|reason| AssetError::Decode {
        path: path.to_string(),
        reason,
    })
}

/// Candidate paths in the order the chain tries them.
fn fallback_candidates(path: &str) -> Vec<String> {
    let mut candidates = vec![path.to_string()];

    let holiday_prefix = format!("{}/", HOLIDAY_DIR);
    if let Some(filename) = path.strip_prefix(&holiday_prefix) {
        candidates.push(format!("images/{}", filename));
    }

    if !candidates.iter().any(|c| c == DEFAULT_BACKGROUND) {
        candidates.push(DEFAULT_BACKGROUND.to_string());
    }

    candidates
}

fn decode_png(bytes: &[u8]) -> Result<Bitmap, String> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|err| err.to_string())?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|err| err.to_string())?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 0xff])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xff]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        other => return Err(format!("unsupported color type {:?}", other)),
    };

    Ok(Bitmap {
        width: info.width,
        height: info.height,
        rgba,
    })
}
