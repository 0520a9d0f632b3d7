pub mod classifier;
pub mod extractors;
pub mod image;
pub mod ocr;

pub use classifier::DocumentClassifier;
pub use extractors::FieldExtractor;
pub use self::image::ImageProcessor;
pub use ocr::{TesseractRecognizer, TextRecognizer};
