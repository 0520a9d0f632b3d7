use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored in any field the extractor could not find.
pub const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Income Tax Department PAN card
    TaxId,
    /// UIDAI Aadhaar card
    BiometricId,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::TaxId => "PAN",
            DocumentKind::BiometricId => "Aadhaar",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanDetails {
    #[serde(rename = "PAN No.")]
    pub pan_number: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Father's Name")]
    pub father_name: String,
}

impl Default for PanDetails {
    fn default() -> Self {
        PanDetails {
            pan_number: NOT_FOUND.to_string(),
            date_of_birth: NOT_FOUND.to_string(),
            name: NOT_FOUND.to_string(),
            father_name: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadhaarDetails {
    #[serde(rename = "Aadhaar No.")]
    pub aadhaar_number: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

impl Default for AadhaarDetails {
    fn default() -> Self {
        AadhaarDetails {
            aadhaar_number: NOT_FOUND.to_string(),
            date_of_birth: NOT_FOUND.to_string(),
            name: NOT_FOUND.to_string(),
            gender: NOT_FOUND.to_string(),
        }
    }
}

/// Fields extracted from one card image.
///
/// Serializes as a flat map with `Type` first, followed by the fixed key set
/// of the document kind. Every key is always present; fields that could not
/// be extracted hold [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum ExtractedRecord {
    #[serde(rename = "PAN")]
    Pan(PanDetails),
    #[serde(rename = "Aadhaar")]
    Aadhaar(AadhaarDetails),
}

impl ExtractedRecord {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedRecord::Pan(_) => DocumentKind::TaxId,
            ExtractedRecord::Aadhaar(_) => DocumentKind::BiometricId,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExtractedRecord::Pan(details) => &details.name,
            ExtractedRecord::Aadhaar(details) => &details.name,
        }
    }

    pub fn date_of_birth(&self) -> &str {
        match self {
            ExtractedRecord::Pan(details) => &details.date_of_birth,
            ExtractedRecord::Aadhaar(details) => &details.date_of_birth,
        }
    }

    pub fn identifier_number(&self) -> &str {
        match self {
            ExtractedRecord::Pan(details) => &details.pan_number,
            ExtractedRecord::Aadhaar(details) => &details.aadhaar_number,
        }
    }

    /// Key/value pairs in rendering order, `Type` included.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            ExtractedRecord::Pan(details) => vec![
                ("Type", DocumentKind::TaxId.as_str()),
                ("PAN No.", details.pan_number.as_str()),
                ("DOB", details.date_of_birth.as_str()),
                ("Name", details.name.as_str()),
                ("Father's Name", details.father_name.as_str()),
            ],
            ExtractedRecord::Aadhaar(details) => vec![
                ("Type", DocumentKind::BiometricId.as_str()),
                ("Aadhaar No.", details.aadhaar_number.as_str()),
                ("DOB", details.date_of_birth.as_str()),
                ("Name", details.name.as_str()),
                ("Gender", details.gender.as_str()),
            ],
        }
    }

    /// Number of fields that hold an extracted value rather than the sentinel.
    pub fn found_count(&self) -> usize {
        self.fields()
            .iter()
            .skip(1)
            .filter(|(_, value)| *value != NOT_FOUND)
            .count()
    }
}
