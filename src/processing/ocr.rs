use std::cell::RefCell;

use image::GrayImage;
use log::{debug, info, warn};
use tesseract::{PageSegMode, Tesseract};

use crate::models::RecognizedText;
use crate::processing::ImageProcessor;
use crate::utils::IdCardError;

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Turns a card image into recognized text lines.
///
/// Implementations are built once at startup and reused for every request.
pub trait TextRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<RecognizedText, IdCardError>;
}

/// Tesseract-backed recognizer.
///
/// The engine is initialized eagerly so a missing language pack fails at
/// startup. Tesseract's builder API consumes the handle on every image, so it
/// is parked in a `RefCell` between requests.
pub struct TesseractRecognizer {
    datapath: Option<String>,
    language: String,
    engine: RefCell<Option<Tesseract>>,
}

impl TesseractRecognizer {
    pub fn new(datapath: Option<&str>, language: &str) -> Result<Self, IdCardError> {
        let engine = Self::init_engine(datapath, language)?;
        info!("Tesseract initialized (language: {})", language);

        Ok(TesseractRecognizer {
            datapath: datapath.map(str::to_string),
            language: language.to_string(),
            engine: RefCell::new(Some(engine)),
        })
    }

    fn init_engine(datapath: Option<&str>, language: &str) -> Result<Tesseract, IdCardError> {
        let mut tess = Tesseract::new(datapath, Some(language))
            .map_err(|e| IdCardError::OcrError(format!("Failed to initialize Tesseract: {}", e)))?;
        tess.set_page_seg_mode(PageSegMode::PsmAuto);
        Ok(tess)
    }

    fn take_engine(&self) -> Result<Tesseract, IdCardError> {
        match self.engine.borrow_mut().take() {
            Some(engine) => Ok(engine),
            None => {
                warn!("Re-initializing Tesseract after a failed request");
                Self::init_engine(self.datapath.as_deref(), &self.language)
            }
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<RecognizedText, IdCardError> {
        let temp_file = ImageProcessor::save_to_temp_file(image)?;
        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| IdCardError::OcrError("Failed to convert path to string".to_string()))?;

        // A failed set_image drops the engine; the next request rebuilds it
        let mut engine = self
            .take_engine()?
            .set_image(path_str)
            .map_err(|e| IdCardError::OcrError(format!("Failed to set image: {}", e)))?;

        let text = engine.get_text();
        *self.engine.borrow_mut() = Some(engine);
        let text = text.map_err(|e| IdCardError::OcrError(format!("Failed to extract text: {}", e)))?;

        debug!("OCR result:\n{}", text);
        let recognized = RecognizedText::from_text(&text);
        if recognized.is_empty() {
            warn!("OCR returned no text");
        }
        Ok(recognized)
    }
}
