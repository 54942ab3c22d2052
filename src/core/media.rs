//! Upload ingestion: size gate, PDF pass-through, image downscale to JPEG,
//! always returned as an inline `data:` URI.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use tracing::debug;

use crate::{
    core::settings::MediaSettings,
    error::{CmsError, Result},
};

const PDF_MIME: &str = "application/pdf";

#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MediaKind {
    Pdf,
    Image,
}

/// Turns raw bytes into pixels.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage>;
}

pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|error| CmsError::ImageDecode(error.to_string()))
    }
}

#[derive(Clone)]
pub struct MediaPipeline {
    limits: MediaSettings,
    decoder: Arc<dyn ImageDecoder>,
}

impl MediaPipeline {
    pub fn new(limits: MediaSettings) -> Self {
        MediaPipeline::with_decoder(limits, Arc::new(StandardDecoder))
    }

    pub fn with_decoder(limits: MediaSettings, decoder: Arc<dyn ImageDecoder>) -> Self {
        MediaPipeline { limits, decoder }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.limits.max_upload_bytes
    }

    pub fn too_large(&self, size: usize) -> CmsError {
        CmsError::ImageTooLarge {
            size,
            max_bytes: self.limits.max_upload_bytes,
            max_mb: self.limits.max_upload_bytes / (1024 * 1024),
        }
    }

    /// Runs the whole pipeline for one file. Steps run strictly in order:
    /// size check, classification, decode, resize, encode.
    pub fn ingest(&self, upload: &Upload) -> Result<String> {
        let size = upload.bytes.len();
        if size > self.max_upload_bytes() {
            return Err(self.too_large(size));
        }
        match classify(upload)? {
            MediaKind::Pdf => Ok(data_uri(PDF_MIME, &upload.bytes)),
            MediaKind::Image => {
                let image = self.decoder.decode(&upload.bytes)?;
                let jpeg = self.downscale(&image)?;
                Ok(data_uri("image/jpeg", &jpeg))
            }
        }
    }

    fn downscale(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let (target_width, target_height) =
            fit_within(width, height, self.limits.max_width, self.limits.max_height);
        debug!(
            "Resizing {}x{} to {}x{}",
            width, height, target_width, target_height
        );
        let resized = if (target_width, target_height) == (width, height) {
            image.to_rgb8()
        } else {
            image
                .resize_exact(target_width, target_height, FilterType::Triangle)
                .to_rgb8()
        };
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.limits.jpeg_quality)
            .encode_image(&resized)
            .map_err(|error| CmsError::ImageDecode(format!("could not encode JPEG: {}", error)))?;
        Ok(jpeg)
    }
}

fn classify(upload: &Upload) -> Result<MediaKind> {
    let content_type = upload.content_type.to_ascii_lowercase();
    if content_type == PDF_MIME || upload.file_name.to_ascii_lowercase().ends_with(".pdf") {
        Ok(MediaKind::Pdf)
    } else if content_type.starts_with("image/") {
        Ok(MediaKind::Image)
    } else {
        Err(CmsError::UnsupportedMedia(upload.content_type.clone()))
    }
}

/// Target size for a `width`x`height` image. Landscape images are capped by
/// `max_width`, everything else by `max_height`; aspect ratio is kept and
/// nothing is ever enlarged.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = |side: u32, numerator: u32, denominator: u32| -> u32 {
        let scaled = f64::from(side) * f64::from(numerator) / f64::from(denominator);
        (scaled.round() as u32).max(1)
    };
    if width > height {
        if width > max_width {
            return (max_width, scale(height, max_width, width));
        }
    } else if height > max_height {
        return (scale(width, max_height, height), max_height);
    }
    (width, height)
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
