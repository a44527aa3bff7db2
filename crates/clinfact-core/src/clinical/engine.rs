//! Extraction engine running every record extractor over one document.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::document::Document;
use crate::models::records::{StayEvent, StayEventKind};
use crate::models::report::{ExtractionReport, ReportMetadata};

use super::rules::{
    MedicationExtractor, NursingExtractor, OrderExtractor, PatientExtractor, ProcedureExtractor,
    RecordExtractor, ReferralExtractor, StayExtractor,
};

/// Runs each category extractor once and aggregates the results.
///
/// Extractors share no state, so the engine is freely shareable across
/// threads and produces the same report for the same text.
pub struct ExtractionEngine {
    patient: PatientExtractor,
    stays: StayExtractor,
    procedures: ProcedureExtractor,
    medications: MedicationExtractor,
    lab_orders: OrderExtractor,
    imaging_orders: OrderExtractor,
    referrals: ReferralExtractor,
    nursing: NursingExtractor,
}

impl ExtractionEngine {
    /// Create an engine with the default vocabularies.
    pub fn new() -> Self {
        Self {
            patient: PatientExtractor::new(),
            stays: StayExtractor::new(),
            procedures: ProcedureExtractor::new(),
            medications: MedicationExtractor::new(),
            lab_orders: OrderExtractor::laboratory(),
            imaging_orders: OrderExtractor::imaging(),
            referrals: ReferralExtractor::new(),
            nursing: NursingExtractor::new(),
        }
    }

    /// Create an engine from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_procedure_keywords(&config.procedure_keywords)
            .with_nursing_keywords(&config.transfusion_keyword, &config.administration_keyword)
    }

    /// Replace the procedure vocabulary.
    pub fn with_procedure_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.procedures = ProcedureExtractor::with_keywords(keywords);
        self
    }

    /// Replace the nursing-note keywords.
    pub fn with_nursing_keywords(mut self, transfusion: &str, administration: &str) -> Self {
        self.nursing = NursingExtractor::with_keywords(transfusion, administration);
        self
    }

    /// Extract every record category from raw text.
    pub fn extract(&self, text: &str) -> ExtractionReport {
        let start = Instant::now();

        info!("Extracting clinical records from {} characters of text", text.chars().count());

        let mut report = ExtractionReport {
            patient: self.patient.extract(text),
            stays: self.stays.extract(text),
            procedures: self.procedures.extract(text),
            medications: self.medications.extract(text),
            lab_orders: self.lab_orders.extract(text),
            imaging_orders: self.imaging_orders.extract(text),
            referrals: self.referrals.extract(text),
            nursing_events: self.nursing.extract(text),
            metadata: ReportMetadata::default(),
        };

        for (category, count) in report.counts() {
            debug!("Extracted {} {} records", count, category);
        }

        let warnings = collect_warnings(text, &report);
        report.metadata = ReportMetadata {
            char_count: text.chars().count(),
            line_count: text.lines().count(),
            processing_time_ms: start.elapsed().as_millis() as u64,
            warnings,
            ..ReportMetadata::default()
        };

        debug!(
            "Extraction finished with {} records and {} warnings",
            report.record_count(),
            report.metadata.warnings.len()
        );

        report
    }

    /// Extract from a loaded document, recording where it came from.
    pub fn extract_document(&self, document: &Document) -> ExtractionReport {
        let mut report = self.extract(&document.text);
        report.metadata.source = Some(document.describe());
        report.metadata.source_kind = document.kind;
        report
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_warnings(text: &str, report: &ExtractionReport) -> Vec<String> {
    let mut warnings = Vec::new();

    if text.trim().is_empty() {
        warnings.push("Document text is empty; upstream text extraction may have failed".to_string());
        return warnings;
    }

    if report.patient.cc.is_none() {
        warnings.push("Could not extract patient identifier (CC)".to_string());
    }

    if discharge_precedes_admission(&report.stays) {
        warnings.push(
            "Inferred UCI discharge precedes an admission; stay dates are approximate".to_string(),
        );
    }

    warnings
}

/// True when the inferred discharge is earlier than some admission.
fn discharge_precedes_admission(stays: &[StayEvent]) -> bool {
    let discharge = stays
        .iter()
        .find(|s| s.kind == StayEventKind::Egreso)
        .and_then(StayEvent::parsed_timestamp);

    let Some(discharge) = discharge else {
        return false;
    };

    stays
        .iter()
        .filter(|s| s.kind == StayEventKind::Ingreso)
        .filter_map(StayEvent::parsed_timestamp)
        .any(|admission| admission > discharge)
}
