use std::path::{Path, PathBuf};
use std::sync::mpsc;

use eframe::egui;
use rayon::prelude::*;
use tracing::{debug, warn};

use hotspot_tour_core::RequestId;

/// A decoded image ready to be uploaded as a texture.
pub(crate) struct DecodedImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

impl DecodedImage {
    pub(crate) fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.rgba,
        )
    }
}

/// Request sent from the UI thread to the image loader.
pub(crate) enum LoaderRequest {
    /// Decode a slide image at full size.
    Image { request: RequestId, path: PathBuf },
    /// Decode downscaled copies of every slide image for the strip.
    Thumbnails {
        generation: u64,
        paths: Vec<PathBuf>,
        max_side: u32,
    },
}

/// Response sent from the loader back to the UI thread.
pub(crate) enum LoaderResponse {
    Image {
        request: RequestId,
        result: Result<DecodedImage, String>,
    },
    Thumbnail {
        generation: u64,
        index: usize,
        image: DecodedImage,
    },
}

/// Spawn the image loader thread.
///
/// Queued slide-image requests are coalesced: only the newest one is
/// decoded, older ones are superseded by navigation and would be dropped
/// as stale anyway. Thumbnails are decoded on the rayon pool. `ctx` is
/// repainted after every response so the UI polls promptly.
pub(crate) fn spawn_image_loader(
    ctx: egui::Context,
) -> (mpsc::Sender<LoaderRequest>, mpsc::Receiver<LoaderResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<LoaderRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<LoaderResponse>();

    std::thread::Builder::new()
        .name("image-loader".into())
        .spawn(move || {
            debug!("Image loader thread started");
            while let Ok(first) = req_rx.recv() {
                let mut latest_image = None;
                for request in std::iter::once(first).chain(req_rx.try_iter()) {
                    match request {
                        LoaderRequest::Image { request, path } => {
                            if let Some((skipped, _)) = latest_image.replace((request, path)) {
                                debug!(request = skipped.0, "Skipping superseded image request");
                            }
                        }
                        LoaderRequest::Thumbnails {
                            generation,
                            paths,
                            max_side,
                        } => spawn_thumbnails(generation, paths, max_side, resp_tx.clone(), ctx.clone()),
                    }
                }

                if let Some((request, path)) = latest_image {
                    let result = decode_image(&path);
                    if let Err(e) = &result {
                        warn!(path = %path.display(), "Image failed to load: {e}");
                    }
                    if resp_tx.send(LoaderResponse::Image { request, result }).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
            }
            debug!("Image loader thread exiting");
        })
        .expect("Failed to spawn image loader thread");

    (req_tx, resp_rx)
}

fn spawn_thumbnails(
    generation: u64,
    paths: Vec<PathBuf>,
    max_side: u32,
    tx: mpsc::Sender<LoaderResponse>,
    ctx: egui::Context,
) {
    rayon::spawn(move || {
        paths.par_iter().enumerate().for_each_with(tx, |tx, (index, path)| {
            match decode_thumbnail(path, max_side) {
                Ok(image) => {
                    let _ = tx.send(LoaderResponse::Thumbnail {
                        generation,
                        index,
                        image,
                    });
                    ctx.request_repaint();
                }
                Err(e) => debug!(index, "No thumbnail for {}: {e}", path.display()),
            }
        });
    });
}

pub(crate) fn decode_image(path: &Path) -> Result<DecodedImage, String> {
    let img = open(path)?;
    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

fn decode_thumbnail(path: &Path, max_side: u32) -> Result<DecodedImage, String> {
    let img = open(path)?;
    let thumb = img.thumbnail(max_side, max_side).to_rgba8();
    Ok(DecodedImage {
        width: thumb.width(),
        height: thumb.height(),
        rgba: thumb.into_raw(),
    })
}

fn open(path: &Path) -> Result<image::DynamicImage, String> {
    image::ImageReader::open(path)
        .map_err(|e| format!("{}: {e}", path.display()))?
        .with_guessed_format()
        .map_err(|e| format!("{}: {e}", path.display()))?
        .decode()
        .map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_from_disk() {
        let dir = std::env::temp_dir().join("hotspot_tour_test_loader");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("tiny.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");

        let decoded = decode_image(&path).expect("decodes");
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);

        let thumb = decode_thumbnail(&path, 2).expect("thumbnail");
        assert!(thumb.width <= 2 && thumb.height <= 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = decode_image(Path::new("/no/such/slide.png"))
            .err()
            .expect("missing file fails");
        assert!(err.contains("slide.png"));
    }
}
