use crate::models::{ExtractedRecord, RecognizedText};
use crate::processing::{DocumentClassifier, FieldExtractor, ImageProcessor, TextRecognizer};
use crate::storage::{IdCardRow, RecordSink};
use crate::utils::IdCardError;
use log::{error, info, warn};
use std::path::Path;

/// Drives one card image through OCR, classification, extraction and storage.
pub struct IdCardProcessor {
    recognizer: Box<dyn TextRecognizer>,
    sink: Box<dyn RecordSink>,
}

impl IdCardProcessor {
    pub fn new(recognizer: Box<dyn TextRecognizer>, sink: Box<dyn RecordSink>) -> Self {
        IdCardProcessor { recognizer, sink }
    }

    /// Main processing function that orchestrates the entire pipeline.
    ///
    /// Image and OCR engine failures are returned. Storage failures are only
    /// logged: the caller always gets the extracted record.
    pub fn process(&self, image_path: &Path, binarize: bool) -> Result<ExtractedRecord, IdCardError> {
        // Step 1: Decode the image
        let image = ImageProcessor::process_image(image_path, binarize)?;

        // Step 2: Recognize text
        let text = self.recognizer.recognize(&image)?;
        info!(
            "Recognized {} text lines in {}",
            text.len(),
            image_path.display()
        );

        // Step 3: Classify, extract and store
        Ok(self.process_text(&text))
    }

    /// Classify and extract already recognized text, then store the record.
    pub fn process_text(&self, text: &RecognizedText) -> ExtractedRecord {
        let record = Self::extract_record(text);
        self.persist(&record);
        record
    }

    /// Classification and extraction only; no side effects.
    pub fn extract_record(text: &RecognizedText) -> ExtractedRecord {
        let kind = DocumentClassifier::classify(text);
        let record = FieldExtractor::extract(kind, text);
        if record.found_count() == 0 {
            warn!("No {} fields could be extracted", kind);
        }
        record
    }

    fn persist(&self, record: &ExtractedRecord) {
        let row = IdCardRow::from_record(record);

        match self.sink.store(&row) {
            Ok(()) => info!(
                "Stored {} record {} ({})",
                record.kind(),
                record.identifier_number(),
                record.name()
            ),
            Err(e) if e.is_fatal() => {
                error!("Database {} error, record not stored: {}", e.kind_name(), e)
            }
            Err(e) => warn!("Database {} error, record not stored: {}", e.kind_name(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AadhaarDetails, DocumentKind};
    use crate::utils::PersistError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingSink;

    impl RecordSink for FailingSink {
        fn store(&self, _row: &IdCardRow) -> Result<(), PersistError> {
            Err(PersistError::Configuration(sqlx::Error::Configuration(
                "password authentication failed".into(),
            )))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        rows: Rc<RefCell<Vec<IdCardRow>>>,
    }

    impl RecordSink for RecordingSink {
        fn store(&self, row: &IdCardRow) -> Result<(), PersistError> {
            self.rows.borrow_mut().push(row.clone());
            Ok(())
        }
    }

    struct NoText;

    impl TextRecognizer for NoText {
        fn recognize(&self, _image: &image::GrayImage) -> Result<RecognizedText, IdCardError> {
            Ok(RecognizedText::default())
        }
    }

    #[test]
    fn test_failed_store_returns_same_record() {
        let text = RecognizedText::from_text("INCOME TAX DEPARTMENT\nJOHN SMITH\nROBERT SMITH\nABCDE1234F\n01/01/1990");
        let processor = IdCardProcessor::new(Box::new(NoText), Box::new(FailingSink));

        let stored = processor.process_text(&text);
        assert_eq!(stored, IdCardProcessor::extract_record(&text));
        assert_eq!(stored.name(), "JOHN SMITH");
    }

    #[test]
    fn test_each_record_is_stored_once() {
        let sink = RecordingSink::default();
        let processor = IdCardProcessor::new(Box::new(NoText), Box::new(sink.clone()));

        processor.process_text(&RecognizedText::from_text("GOVERNMENT OF INDIA\nAsha Rao\n1234 5678 9012"));

        let rows = sink.rows.borrow();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, DocumentKind::BiometricId);
        assert_eq!(rows[0].aadhaar_number.as_deref(), Some("1234 5678 9012"));
        assert_eq!(rows[0].dob, None);
    }

    #[test]
    fn test_empty_recognition_yields_sentinels() {
        let record = IdCardProcessor::extract_record(&RecognizedText::default());
        assert_eq!(record, ExtractedRecord::Aadhaar(AadhaarDetails::default()));
    }

    #[test]
    fn test_unreadable_image_is_an_error() {
        let processor = IdCardProcessor::new(Box::new(NoText), Box::new(RecordingSink::default()));
        let result = processor.process(Path::new("/nonexistent/card.png"), false);
        assert!(matches!(result, Err(IdCardError::ImageProcessingError(_))));
    }
}
