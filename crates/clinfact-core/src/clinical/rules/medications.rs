//! Medication list extraction from standard prescription blocks.
//!
//! Each medication spans two lines: a header with quantity and description,
//! then a detail line with dose, route and frequency.

use super::patterns::{
    MEDICATION_DOSE, MEDICATION_FREQUENCY, MEDICATION_HEADER, MEDICATION_MARKER, MEDICATION_ROUTE,
};
use super::{capture_trimmed, RecordExtractor};
use crate::models::records::MedicationRecord;

pub struct MedicationExtractor;

impl MedicationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scan one block; state does not carry over between blocks.
    fn extract_block(&self, block: &str, records: &mut Vec<MedicationRecord>) {
        let lines: Vec<&str> = block.lines().collect();
        let mut i = 0;

        while i < lines.len() {
            let Some((quantity, medication)) = parse_header(lines[i]) else {
                i += 1;
                continue;
            };

            // The following line is the detail line whatever it contains
            let detail = lines.get(i + 1).copied().unwrap_or_default();
            records.push(MedicationRecord {
                quantity,
                medication,
                dose: capture_trimmed(&MEDICATION_DOSE, detail),
                route: capture_trimmed(&MEDICATION_ROUTE, detail),
                frequency: capture_trimmed(&MEDICATION_FREQUENCY, detail),
            });
            i += 2;
        }
    }
}

fn parse_header(line: &str) -> Option<(String, String)> {
    let caps = MEDICATION_HEADER.captures(line)?;
    Some((caps[1].to_string(), caps[2].trim().to_string()))
}

impl Default for MedicationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for MedicationExtractor {
    type Output = Vec<MedicationRecord>;

    fn extract(&self, text: &str) -> Vec<MedicationRecord> {
        let mut records = Vec::new();
        for block in MEDICATION_MARKER.segment(text) {
            self.extract_block(block, &mut records);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn medication(
        quantity: &str,
        name: &str,
        dose: Option<&str>,
        route: Option<&str>,
        frequency: Option<&str>,
    ) -> MedicationRecord {
        MedicationRecord {
            quantity: quantity.to_string(),
            medication: name.to_string(),
            dose: dose.map(str::to_string),
            route: route.map(str::to_string),
            frequency: frequency.map(str::to_string),
        }
    }

    #[test]
    fn test_header_and_detail() {
        let text = "FORMULA MEDICA ESTANDAR\n2 ACETAMINOFEN\nDosis: 500mg Via ORAL Frecuencia CADA 8 HORAS\n";
        let records = MedicationExtractor::new().extract(text);

        assert_eq!(
            records,
            vec![medication("2", "ACETAMINOFEN", Some("500mg"), Some("ORAL"), Some("CADA 8 HORAS"))]
        );
    }

    #[test]
    fn test_description_stops_at_number_and_status_ends_frequency() {
        let text = "Formula Medica Estandar\n\
                    1.5 ENOXAPARINA SODICA 40 MG/0.4 ML\n\
                    Dosis: 40 MG Vía SUBCUTANEA Frecuencia CADA 24 HORAS Estado ACTIVO\n";
        let records = MedicationExtractor::new().extract(text);

        assert_eq!(
            records,
            vec![medication(
                "1.5",
                "ENOXAPARINA SODICA",
                Some("40 MG"),
                Some("SUBCUTANEA"),
                Some("CADA 24 HORAS")
            )]
        );
    }

    #[test]
    fn test_missing_detail_fields() {
        let text = "FORMULA MEDICA ESTANDAR\n3 OMEPRAZOL\nVia ORAL\n";
        let records = MedicationExtractor::new().extract(text);

        assert_eq!(records, vec![medication("3", "OMEPRAZOL", None, Some("ORAL"), None)]);
    }

    #[test]
    fn test_detail_line_consumed_even_if_header_like() {
        let text = "FORMULA MEDICA ESTANDAR\n1 DIPIRONA\n2 RANITIDINA\n3 LOSARTAN\nDosis: 50 MG";
        let records = MedicationExtractor::new().extract(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].medication, "DIPIRONA");
        assert_eq!(records[0].dose, None);
        assert_eq!(records[1].medication, "LOSARTAN");
        assert_eq!(records[1].dose.as_deref(), Some("50 MG"));
    }

    #[test]
    fn test_header_on_last_line() {
        let records = MedicationExtractor::new().extract("FORMULA MEDICA ESTANDAR\n4 FUROSEMIDA");
        assert_eq!(records, vec![medication("4", "FUROSEMIDA", None, None, None)]);
    }

    #[test]
    fn test_blocks_are_independent() {
        let text = "2 FUERA DE BLOQUE\nDosis: 1\n\
                    FORMULA MEDICA ESTANDAR\nsin items\n\
                    FORMULA MEDICA ESTANDAR\n1 TRAMADOL\nDosis: 50 MG\n";
        let records = MedicationExtractor::new().extract(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].medication, "TRAMADOL");
    }

    #[test]
    fn test_no_marker() {
        assert!(MedicationExtractor::new().extract("2 ACETAMINOFEN\nDosis: 1").is_empty());
    }
}
