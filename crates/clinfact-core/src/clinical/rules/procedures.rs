//! Billable procedure extraction by keyword vocabulary.

use super::dates::first_date;
use super::RecordExtractor;
use crate::models::records::ProcedureRecord;

/// Default billable procedure vocabulary.
pub const PROCEDURE_KEYWORDS: &[&str] = &[
    "BIOPSIA",
    "CATETER VENOSO CENTRAL",
    "INTUBACION",
    "TRANSFUSION",
    "VENTILACION MECANICA",
    "ECOGRAFIA",
    "TORACENTESIS",
    "SONDA VESICAL",
    "SONDA OROGASTRICA",
];

/// Emits one record per keyword found on each line. A line naming two
/// procedures yields two records.
pub struct ProcedureExtractor {
    keywords: Vec<String>,
}

impl ProcedureExtractor {
    /// Create an extractor with the default vocabulary.
    pub fn new() -> Self {
        Self::with_keywords(PROCEDURE_KEYWORDS.iter().copied())
    }

    /// Create an extractor with a custom vocabulary.
    ///
    /// Keywords are matched and reported upper-cased; blank keywords are
    /// ignored.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

}

impl Default for ProcedureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for ProcedureExtractor {
    type Output = Vec<ProcedureRecord>;

    fn extract(&self, text: &str) -> Vec<ProcedureRecord> {
        let mut records = Vec::new();

        for line in text.lines() {
            let upper = line.to_uppercase();
            for keyword in self.keywords.iter().filter(|k| upper.contains(k.as_str())) {
                records.push(ProcedureRecord {
                    procedure: keyword.clone(),
                    date: first_date(line),
                    line: line.trim().to_string(),
                });
            }
        }

        records
    }
}
