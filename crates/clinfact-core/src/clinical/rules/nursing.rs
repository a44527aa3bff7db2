//! Nursing-note event extraction.

use super::dates::first_date;
use super::RecordExtractor;
use crate::models::records::{NursingEventKind, NursingEventRecord};

pub const TRANSFUSION_KEYWORD: &str = "TRANSFUSION";
pub const ADMINISTRATION_KEYWORD: &str = "ADMINISTRA";

/// Classifies every document line mentioning a transfusion or an
/// administration. Transfusion takes precedence when both appear.
pub struct NursingExtractor {
    transfusion: String,
    administration: String,
}

impl NursingExtractor {
    pub fn new() -> Self {
        Self::with_keywords(TRANSFUSION_KEYWORD, ADMINISTRATION_KEYWORD)
    }

    pub fn with_keywords(transfusion: &str, administration: &str) -> Self {
        Self {
            transfusion: transfusion.trim().to_uppercase(),
            administration: administration.trim().to_uppercase(),
        }
    }

    fn classify(&self, upper_line: &str) -> Option<NursingEventKind> {
        let has = |keyword: &str| !keyword.is_empty() && upper_line.contains(keyword);

        if has(self.transfusion.as_str()) {
            Some(NursingEventKind::Transfusion)
        } else if has(self.administration.as_str()) {
            Some(NursingEventKind::Administracion)
        } else {
            None
        }
    }
}

impl Default for NursingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for NursingExtractor {
    type Output = Vec<NursingEventRecord>;

    fn extract(&self, text: &str) -> Vec<NursingEventRecord> {
        text.lines()
            .filter_map(|line| {
                let kind = self.classify(&line.to_uppercase())?;
                Some(NursingEventRecord {
                    kind,
                    date: first_date(line),
                    detail: line.trim().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transfusion_takes_precedence() {
        let text = "09/01/2024 Se administra transfusion de globulos rojos";
        let records = NursingExtractor::new().extract(text);

        assert_eq!(
            records,
            vec![NursingEventRecord {
                kind: NursingEventKind::Transfusion,
                date: Some("09/01/2024".to_string()),
                detail: text.to_string(),
            }]
        );
    }

    #[test]
    fn test_administration_lines() {
        let text = "Se Administra medicamento segun orden\nsignos vitales estables\n  ADMINISTRACION de oxigeno 10/01/2024  ";
        let records = NursingExtractor::new().extract(text);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind == NursingEventKind::Administracion));
        assert_eq!(records[0].date, None);
        assert_eq!(records[1].detail, "ADMINISTRACION de oxigeno 10/01/2024");
        assert_eq!(records[1].date.as_deref(), Some("10/01/2024"));
    }

    #[test]
    fn test_custom_keywords() {
        let extractor = NursingExtractor::with_keywords("hemoderivado", "");
        let records = extractor.extract("Paso de HEMODERIVADO\nSe administra dipirona");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, NursingEventKind::Transfusion);
    }
}
