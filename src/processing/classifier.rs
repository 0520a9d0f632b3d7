use log::{debug, warn};

use crate::models::{DocumentKind, RecognizedText};
use crate::processing::extractors::{AADHAAR_MARKER, PAN_MARKERS, PAN_NUMBER_PATTERN};

pub struct DocumentClassifier;

impl DocumentClassifier {
    /// A PAN number anywhere in the text makes it a PAN card; everything else
    /// is treated as Aadhaar.
    pub fn classify(text: &RecognizedText) -> DocumentKind {
        let full_text = text.joined();

        if PAN_NUMBER_PATTERN.is_match(&full_text) {
            if Self::looks_like_aadhaar(&full_text) {
                // A PAN-shaped token on an Aadhaar card still routes to PAN
                warn!("PAN number pattern found on a card carrying only the Aadhaar header; classifying as PAN");
            }
            debug!("Classified document as PAN");
            DocumentKind::TaxId
        } else {
            debug!("Classified document as Aadhaar");
            DocumentKind::BiometricId
        }
    }

    fn looks_like_aadhaar(full_text: &str) -> bool {
        let lower = full_text.to_lowercase();
        lower.contains(AADHAAR_MARKER) && !PAN_MARKERS.iter().any(|marker| lower.contains(marker))
    }
}
