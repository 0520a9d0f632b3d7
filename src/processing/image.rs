use crate::utils::IdCardError;
use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat};
use imageproc::contrast::{otsu_level, threshold};
use log::debug;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode a card image and convert it to grayscale, optionally binarized.
    pub fn process_image(image_path: &Path, binarize: bool) -> Result<GrayImage, IdCardError> {
        let img = image::open(image_path).map_err(|e| {
            IdCardError::ImageProcessingError(format!(
                "Failed to open image {}: {}",
                image_path.display(),
                e
            ))
        })?;
        let (width, height) = img.dimensions();
        debug!("Loaded {} ({}x{})", image_path.display(), width, height);

        let gray = img.to_luma8();
        if binarize {
            Ok(Self::binarize(&gray))
        } else {
            Ok(gray)
        }
    }

    /// Black/white image split at the Otsu level.
    pub fn binarize(img: &GrayImage) -> GrayImage {
        let level = otsu_level(img);
        debug!("Otsu threshold level {}", level);
        threshold(img, level)
    }

    /// Write the image as PNG to a temporary file the OCR engine can read.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn save_to_temp_file(img: &GrayImage) -> Result<NamedTempFile, IdCardError> {
        let temp_file = tempfile::Builder::new()
            .prefix("idcard-")
            .suffix(".png")
            .tempfile()?;

        DynamicImage::ImageLuma8(img.clone())
            .save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| IdCardError::ImageProcessingError(format!("Failed to write temp image: {}", e)))?;

        Ok(temp_file)
    }
}
