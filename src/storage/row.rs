use chrono::NaiveDate;
use log::warn;

use crate::models::{DocumentKind, ExtractedRecord, NOT_FOUND};

/// Date layout printed on both card types.
pub const DOB_FORMAT: &str = "%d/%m/%Y";

/// One row of `id_card_data`.
///
/// Columns that do not apply to the document kind are `None` and stored as
/// NULL. `uploaded_at` is assigned by the database server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCardRow {
    pub kind: DocumentKind,
    pub name: String,
    pub father_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub pan_number: Option<String>,
    pub aadhaar_number: Option<String>,
}

impl IdCardRow {
    pub fn from_record(record: &ExtractedRecord) -> Self {
        let dob = parse_dob(record.date_of_birth());

        match record {
            ExtractedRecord::Pan(details) => IdCardRow {
                kind: DocumentKind::TaxId,
                name: details.name.clone(),
                father_name: Some(details.father_name.clone()),
                gender: None,
                dob,
                pan_number: Some(details.pan_number.clone()),
                aadhaar_number: None,
            },
            ExtractedRecord::Aadhaar(details) => IdCardRow {
                kind: DocumentKind::BiometricId,
                name: details.name.clone(),
                father_name: None,
                gender: Some(details.gender.clone()),
                dob,
                pan_number: None,
                aadhaar_number: Some(details.aadhaar_number.clone()),
            },
        }
    }
}

/// Calendar date for the `dob` column.
///
/// The sentinel maps to NULL. A recognized string that is not a real date
/// (OCR can produce `31/02/1990`) also maps to NULL so the rest of the row is
/// still stored.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    if raw == NOT_FOUND {
        return None;
    }

    match NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Storing NULL date of birth, could not parse {:?}: {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AadhaarDetails, PanDetails};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pan_row_leaves_aadhaar_columns_null() {
        let record = ExtractedRecord::Pan(PanDetails {
            pan_number: "ABCDE1234F".to_string(),
            date_of_birth: "01/01/1990".to_string(),
            name: "JOHN SMITH".to_string(),
            father_name: "ROBERT SMITH".to_string(),
        });

        assert_eq!(
            IdCardRow::from_record(&record),
            IdCardRow {
                kind: DocumentKind::TaxId,
                name: "JOHN SMITH".to_string(),
                father_name: Some("ROBERT SMITH".to_string()),
                gender: None,
                dob: NaiveDate::from_ymd_opt(1990, 1, 1),
                pan_number: Some("ABCDE1234F".to_string()),
                aadhaar_number: None,
            }
        );
    }

    #[test]
    fn test_aadhaar_row_without_dob_has_null_date() {
        let record = ExtractedRecord::Aadhaar(AadhaarDetails {
            aadhaar_number: "1234 5678 9012".to_string(),
            name: "Asha Rao".to_string(),
            gender: "Female".to_string(),
            ..AadhaarDetails::default()
        });
        let row = IdCardRow::from_record(&record);

        assert_eq!(row.kind, DocumentKind::BiometricId);
        assert_eq!(row.dob, None);
        assert_eq!(row.gender.as_deref(), Some("Female"));
        assert_eq!(row.father_name, None);
        assert_eq!(row.pan_number, None);
    }

    #[test]
    fn test_parse_dob() {
        assert_eq!(parse_dob("15/08/1985"), NaiveDate::from_ymd_opt(1985, 8, 15));
        assert_eq!(parse_dob(NOT_FOUND), None);
        assert_eq!(parse_dob("31/02/1990"), None);
        assert_eq!(parse_dob("1990-01-01"), None);
    }
}
