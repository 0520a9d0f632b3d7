// Field extraction for PAN and Aadhaar cards
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{
    AadhaarDetails, DocumentKind, ExtractedRecord, PanDetails, RecognizedText, NOT_FOUND,
};

// Issuing-authority headers printed above the cardholder block
pub const PAN_MARKERS: [&str; 2] = ["income tax department", "govt. of india"];
pub const AADHAAR_MARKER: &str = "government of india";

lazy_static! {
    pub static ref PAN_NUMBER_PATTERN: Regex = Regex::new(r"[A-Z]{5}[0-9]{4}[A-Z]").unwrap();
    // Grouping whitespace is horizontal only, so a year on one line never
    // joins a number on the next
    pub static ref AADHAAR_NUMBER_PATTERN: Regex =
        Regex::new(r"\d{4}[ \t]?\d{4}[ \t]?\d{4}").unwrap();
    pub static ref DOB_PATTERN: Regex = Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap();
    pub static ref GENDER_PATTERN: Regex = Regex::new(r"(?i)\b(male|female|m|f)\b").unwrap();
}

pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(kind: DocumentKind, text: &RecognizedText) -> ExtractedRecord {
        match kind {
            DocumentKind::TaxId => ExtractedRecord::Pan(Self::extract_pan_details(text)),
            DocumentKind::BiometricId => ExtractedRecord::Aadhaar(Self::extract_aadhaar_details(text)),
        }
    }

    /// Extract PAN card fields.
    ///
    /// The cardholder block follows the issuing-authority header: the first
    /// line after it is the cardholder, the second the father. Number and date
    /// are searched in the whole text.
    pub fn extract_pan_details(text: &RecognizedText) -> PanDetails {
        let lines = text.lines();

        // Without a header nothing is skipped
        let start_index = lines
            .iter()
            .position(|line| Self::contains_pan_marker(line))
            .unwrap_or(0);

        let filtered_lines: Vec<&String> = lines[start_index..]
            .iter()
            .filter(|line| !Self::contains_pan_marker(line))
            .collect();

        let full_text = text.joined();

        PanDetails {
            pan_number: Self::first_match(&PAN_NUMBER_PATTERN, &full_text),
            date_of_birth: Self::first_match(&DOB_PATTERN, &full_text),
            name: Self::nth_or_not_found(&filtered_lines, 0),
            father_name: Self::nth_or_not_found(&filtered_lines, 1),
        }
    }

    /// Extract Aadhaar card fields.
    ///
    /// The name is the first plausible text line after the
    /// "Government of India" header.
    pub fn extract_aadhaar_details(text: &RecognizedText) -> AadhaarDetails {
        let full_text = text.joined();

        let aadhaar_number = Self::first_match(&AADHAAR_NUMBER_PATTERN, &full_text);
        let date_of_birth = Self::first_match(&DOB_PATTERN, &full_text);
        let gender = GENDER_PATTERN
            .find(&full_text)
            .map(|m| Self::normalize_gender(m.as_str()))
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let candidates = Self::name_candidates(text);
        let start_index = candidates
            .iter()
            .position(|line| line.to_lowercase().contains(AADHAAR_MARKER))
            .map(|i| i + 1)
            .unwrap_or(0);

        let name = candidates[start_index..]
            .iter()
            .find(|line| Self::is_plausible_name(line))
            .map(|line| line.to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string());

        AadhaarDetails {
            aadhaar_number,
            date_of_birth,
            name,
            gender,
        }
    }

    /// Expand a single-letter gender token to the full word.
    ///
    /// Full words pass through as recognized; anything else is not a gender.
    pub fn normalize_gender(token: &str) -> String {
        let token = token.trim();
        match token.to_ascii_uppercase().as_str() {
            "M" => "Male".to_string(),
            "F" => "Female".to_string(),
            "MALE" | "FEMALE" => token.to_string(),
            _ => NOT_FOUND.to_string(),
        }
    }

    fn contains_pan_marker(line: &str) -> bool {
        let lower = line.to_lowercase();
        PAN_MARKERS.iter().any(|marker| lower.contains(marker))
    }

    // OCR output that lost its line breaks arrives as one line; fall back to
    // single words there
    fn name_candidates(text: &RecognizedText) -> Vec<&str> {
        match text.lines() {
            [single] => single.split_whitespace().collect(),
            lines => lines.iter().map(|line| line.as_str()).collect(),
        }
    }

    fn is_plausible_name(line: &str) -> bool {
        let line = line.trim();
        let length = line.chars().count();
        !line.chars().any(|c| c.is_numeric()) && length > 2 && length < 40
    }

    fn first_match(pattern: &Regex, text: &str) -> String {
        pattern
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }

    fn nth_or_not_found(lines: &[&String], index: usize) -> String {
        lines
            .get(index)
            .map(|line| line.to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }
}
