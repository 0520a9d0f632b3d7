pub mod record;
pub mod text;

pub use record::{AadhaarDetails, DocumentKind, ExtractedRecord, PanDetails, NOT_FOUND};
pub use text::RecognizedText;
