//! Asset preloading service
//!
//! Scans the configured assets directory, decodes every gallery image on a
//! rayon pool inside one worker thread, and streams results back over a
//! channel the UI drains each frame. The gallery never starts empty: slots
//! without a decodable file get a deterministic placeholder.

use crate::config::AssetsConfig;
use crate::error::GalleryError;
use crate::util::Prng;
use crossbeam_channel::{unbounded, Receiver, Sender};
use image::{GenericImageView, ImageReader};
use rayon::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Messages streamed from the preload worker
#[derive(Debug)]
pub enum PreloadEvent {
    /// One decoded gallery slot, RGBA8 pixels
    Image {
        index: usize,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    /// Raw bytes of the configured display font
    FontLoaded(Vec<u8>),
    /// Worker is done; the loading flag can clear
    Finished { loaded: usize, failed: usize },
}

/// Decoded RGBA8 image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Handle to the background preload worker
pub struct Preloader {
    event_rx: Receiver<PreloadEvent>,
}

impl Preloader {
    /// Start preloading `slots` gallery images plus the optional font.
    /// Returns immediately; progress arrives through `try_next`.
    pub fn spawn(assets: &AssetsConfig, slots: usize) -> Self {
        let (event_tx, event_rx) = unbounded();
        let dir = assets.dir.clone();
        let font = assets.font.clone();
        let max_edge = assets.max_decode_edge;

        std::thread::spawn(move || {
            run_worker(dir, font, slots, max_edge, &event_tx);
        });

        Self { event_rx }
    }

    /// Next pending event, if any (non-blocking)
    pub fn try_next(&self) -> Option<PreloadEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn run_worker(
    dir: Option<PathBuf>,
    font: Option<PathBuf>,
    slots: usize,
    max_edge: u32,
    event_tx: &Sender<PreloadEvent>,
) {
    let paths = match dir.as_deref() {
        Some(dir) => scan_images(dir),
        None => Vec::new(),
    };
    tracing::info!(slots, found = paths.len(), "preload start");

    let mut loaded = 0;
    let mut failed = 0;

    if paths.is_empty() {
        if dir.is_some() {
            tracing::warn!(?dir, "assets directory has no decodable images, using placeholders");
        }
        for index in 0..slots {
            let img = placeholder_image(index, 512);
            send_image(event_tx, index, img);
            loaded += 1;
        }
    } else {
        // slots cycle through the available files; decode order is
        // parallel, delivery order does not matter to the stage
        let results: Vec<(usize, Result<DecodedImage, GalleryError>)> = (0..slots)
            .into_par_iter()
            .map(|index| {
                let path = &paths[index % paths.len()];
                (index, decode_image(path, max_edge))
            })
            .collect();

        for (index, result) in results {
            match result {
                Ok(img) => {
                    send_image(event_tx, index, img);
                    loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(index, error = %err, "image decode failed, using placeholder");
                    send_image(event_tx, index, placeholder_image(index, 512));
                    failed += 1;
                }
            }
        }
    }

    if let Some(font_path) = font {
        match std::fs::read(&font_path) {
            Ok(bytes) => {
                tracing::info!(path = %font_path.display(), size = bytes.len(), "font loaded");
                let _ = event_tx.send(PreloadEvent::FontLoaded(bytes));
            }
            Err(err) => {
                let err = GalleryError::Font(format!("{}: {}", font_path.display(), err));
                tracing::warn!(error = %err, "{}", err.user_message());
            }
        }
    }

    tracing::info!(loaded, failed, "preload finished");
    let _ = event_tx.send(PreloadEvent::Finished { loaded, failed });
}

fn send_image(event_tx: &Sender<PreloadEvent>, index: usize, img: DecodedImage) {
    let _ = event_tx.send(PreloadEvent::Image {
        index,
        width: img.width,
        height: img.height,
        rgba: img.rgba,
    });
}

/// Collect decodable image files in the directory, sorted by name so slot
/// assignment is stable across runs
pub fn scan_images(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            let err = GalleryError::AssetScan(format!("{}: {}", dir.display(), err));
            tracing::warn!(error = %err, "{}", err.user_message());
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    paths.sort();
    paths
}

/// Decode an image file to RGBA8, downscaling so neither edge exceeds
/// `max_edge` (textures stay GPU-friendly)
pub fn decode_image(path: &Path, max_edge: u32) -> Result<DecodedImage, GalleryError> {
    tracing::debug!("decoding image: {}", path.display());

    let data = std::fs::read(path)?;

    let reader = ImageReader::new(Cursor::new(&data))
        .with_guessed_format()
        .map_err(|e| GalleryError::ImageDecode(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| GalleryError::ImageDecode(e.to_string()))?;

    let (w, h) = img.dimensions();
    let img = if w > max_edge || h > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Check if a file is a supported image format
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            matches!(
                e.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp"
            )
        })
        .unwrap_or(false)
}

/// Deterministic stand-in texture for a gallery slot: a two-tone vertical
/// gradient with a slot-seeded palette, same output for the same index
pub fn placeholder_image(index: usize, edge: u32) -> DecodedImage {
    let mut prng = Prng::new((index as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    let top = [
        (40.0 + prng.next_f32() * 60.0) as u8,
        (40.0 + prng.next_f32() * 60.0) as u8,
        (50.0 + prng.next_f32() * 70.0) as u8,
    ];
    let bottom = [
        (140.0 + prng.next_f32() * 100.0) as u8,
        (120.0 + prng.next_f32() * 100.0) as u8,
        (130.0 + prng.next_f32() * 110.0) as u8,
    ];

    let mut rgba = Vec::with_capacity((edge * edge * 4) as usize);
    for y in 0..edge {
        let t = y as f32 / (edge - 1).max(1) as f32;
        for x in 0..edge {
            // faint diagonal banding so slots are visually distinct
            let band: u8 = if (x / 32 + y / 32) % 2 == 0 { 0 } else { 12 };
            for c in 0..3 {
                let v = top[c] as f32 + (bottom[c] as f32 - top[c] as f32) * t;
                rgba.push((v as u8).saturating_add(band));
            }
            rgba.push(255);
        }
    }

    DecodedImage {
        width: edge,
        height: edge,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("cell.jpg")));
        assert!(is_supported_image(Path::new("cell.PNG")));
        assert!(is_supported_image(Path::new("cell.WebP")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("clip.mp4")));
    }

    #[test]
    fn test_placeholder_deterministic_per_slot() {
        let a = placeholder_image(3, 16);
        let b = placeholder_image(3, 16);
        let c = placeholder_image(4, 16);
        assert_eq!(a.rgba, b.rgba);
        assert_ne!(a.rgba, c.rgba);
        assert_eq!(a.width, 16);
        assert_eq!(a.rgba.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_preloader_placeholders_without_assets_dir() {
        let assets = AssetsConfig {
            dir: None,
            ..AssetsConfig::default()
        };
        let preloader = Preloader::spawn(&assets, 4);

        let mut images = 0;
        let mut finished = false;
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !finished && std::time::Instant::now() < deadline {
            match preloader.try_next() {
                Some(PreloadEvent::Image { rgba, .. }) => {
                    assert!(!rgba.is_empty());
                    images += 1;
                }
                Some(PreloadEvent::Finished { loaded, failed }) => {
                    assert_eq!(loaded, 4);
                    assert_eq!(failed, 0);
                    finished = true;
                }
                Some(PreloadEvent::FontLoaded(_)) => {}
                None => std::thread::sleep(std::time::Duration::from_millis(5)),
            }
        }
        assert!(finished, "worker never reported completion");
        assert_eq!(images, 4);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let paths = scan_images(Path::new("/nonexistent/vitrine-assets"));
        assert!(paths.is_empty());
    }
}
