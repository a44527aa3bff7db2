//! Patient demographic field extraction.

use regex::Regex;

use super::patterns::{PATIENT_AFFILIATION, PATIENT_AGE, PATIENT_CC, PATIENT_COMPANY};
use super::{capture_trimmed, RecordExtractor};
use crate::models::records::{PatientField, PatientRecord};

/// Locates each patient field independently; the first match in the
/// document wins.
pub struct PatientExtractor;

impl PatientExtractor {
    pub fn new() -> Self {
        Self
    }

    fn pattern(field: PatientField) -> &'static Regex {
        match field {
            PatientField::Cc => &PATIENT_CC,
            PatientField::Edad => &PATIENT_AGE,
            PatientField::Empresa => &PATIENT_COMPANY,
            PatientField::Afiliado => &PATIENT_AFFILIATION,
        }
    }
}

impl Default for PatientExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for PatientExtractor {
    type Output = PatientRecord;

    fn extract(&self, text: &str) -> PatientRecord {
        let mut record = PatientRecord::default();
        for field in PatientField::ALL {
            record.set(field, capture_trimmed(Self::pattern(field), text));
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cc_and_age() {
        let text = "HISTORIA CLINICA\nNo. CC: 123456\nEdad actual: 45 AÑOS\n";
        let patient = PatientExtractor::new().extract(text);

        let map = patient.to_map();
        assert_eq!(map["CC"], "123456");
        assert_eq!(map["Edad"], "45");
        assert_eq!(map["Empresa"], "");
        assert_eq!(map["Afiliado"], "");
    }

    #[test]
    fn test_company_and_affiliation_trimmed() {
        let text = "Empresa:   NUEVA EPS S.A.   \nAfiliado: COTIZANTE\nEdad actual 80 años";
        let patient = PatientExtractor::new().extract(text);

        assert_eq!(patient.empresa.as_deref(), Some("NUEVA EPS S.A."));
        assert_eq!(patient.afiliado.as_deref(), Some("COTIZANTE"));
        assert_eq!(patient.edad.as_deref(), Some("80"));
        assert_eq!(patient.cc, None);
    }

    #[test]
    fn test_case_insensitive_first_match_wins() {
        let text = "no.cc 111\nNo. CC: 222\nedad ACTUAL: 7 anos";
        let patient = PatientExtractor::new().extract(text);

        assert_eq!(patient.cc.as_deref(), Some("111"));
        assert_eq!(patient.edad.as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_text() {
        let patient = PatientExtractor::new().extract("");
        assert!(patient.is_empty());
    }
}
