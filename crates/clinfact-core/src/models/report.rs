//! Aggregated extraction output and its tabular view.

use serde::{Deserialize, Serialize};

use super::document::SourceKind;
use super::records::*;

/// Table names, in report order.
pub const PATIENT_TABLE: &str = "paciente";
pub const STAYS_TABLE: &str = "estancias";
pub const PROCEDURES_TABLE: &str = "procedimientos";
pub const MEDICATIONS_TABLE: &str = "medicamentos";
pub const LAB_ORDERS_TABLE: &str = "laboratorios";
pub const IMAGING_ORDERS_TABLE: &str = "imagenes";
pub const REFERRALS_TABLE: &str = "interconsultas";
pub const NURSING_TABLE: &str = "enfermeria";

/// A record that renders as one table row.
pub trait TableRow {
    /// Cell values, in the order of the table's columns.
    fn cells(&self) -> Vec<String>;
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl TableRow for PatientRecord {
    fn cells(&self) -> Vec<String> {
        PatientField::ALL
            .iter()
            .map(|f| self.get(*f).unwrap_or_default().to_string())
            .collect()
    }
}

impl TableRow for StayEvent {
    fn cells(&self) -> Vec<String> {
        vec![
            self.service.to_string(),
            self.kind.to_string(),
            self.timestamp.clone(),
        ]
    }
}

impl TableRow for ProcedureRecord {
    fn cells(&self) -> Vec<String> {
        vec![self.procedure.clone(), cell(&self.date), self.line.clone()]
    }
}

impl TableRow for MedicationRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.quantity.clone(),
            self.medication.clone(),
            cell(&self.dose),
            cell(&self.route),
            cell(&self.frequency),
        ]
    }
}

impl TableRow for OrderRecord {
    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), cell(&self.date), self.line.clone()]
    }
}

impl TableRow for ReferralRecord {
    fn cells(&self) -> Vec<String> {
        vec![self.specialty.clone(), cell(&self.date)]
    }
}

impl TableRow for NursingEventRecord {
    fn cells(&self) -> Vec<String> {
        vec![self.kind.to_string(), cell(&self.date), self.detail.clone()]
    }
}

/// Named table: column headers plus string rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records<R: TableRow>(name: &str, columns: &[&str], records: &[R]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Information about how a report was produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File or label the text came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// How the text was obtained.
    pub source_kind: SourceKind,

    /// Characters in the input text.
    pub char_count: usize,

    /// Lines in the input text.
    pub line_count: usize,

    /// Extraction time in milliseconds.
    pub processing_time_ms: u64,

    /// Non-fatal observations about the extraction.
    pub warnings: Vec<String>,
}

/// All record collections extracted from one document.
///
/// Every collection is always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    #[serde(rename = "paciente")]
    pub patient: PatientRecord,

    #[serde(rename = "estancias")]
    pub stays: Vec<StayEvent>,

    #[serde(rename = "procedimientos")]
    pub procedures: Vec<ProcedureRecord>,

    #[serde(rename = "medicamentos")]
    pub medications: Vec<MedicationRecord>,

    #[serde(rename = "laboratorios")]
    pub lab_orders: Vec<LabOrderRecord>,

    #[serde(rename = "imagenes")]
    pub imaging_orders: Vec<ImagingOrderRecord>,

    #[serde(rename = "interconsultas")]
    pub referrals: Vec<ReferralRecord>,

    #[serde(rename = "enfermeria")]
    pub nursing_events: Vec<NursingEventRecord>,

    pub metadata: ReportMetadata,
}

impl ExtractionReport {
    /// The fixed set of report tables, patient first.
    pub fn tables(&self) -> Vec<Table> {
        vec![
            Table::from_records(PATIENT_TABLE, &["CC", "Edad", "Empresa", "Afiliado"], std::slice::from_ref(&self.patient)),
            Table::from_records(STAYS_TABLE, &["servicio", "tipo", "fecha"], &self.stays),
            Table::from_records(PROCEDURES_TABLE, &["procedimiento", "fecha", "descripcion"], &self.procedures),
            Table::from_records(
                MEDICATIONS_TABLE,
                &["cantidad", "medicamento", "dosis", "via", "frecuencia"],
                &self.medications,
            ),
            Table::from_records(
                LAB_ORDERS_TABLE,
                &[OrderKind::Laboratorio.name_column(), "fecha", "linea"],
                &self.lab_orders,
            ),
            Table::from_records(
                IMAGING_ORDERS_TABLE,
                &[OrderKind::Imagen.name_column(), "fecha", "linea"],
                &self.imaging_orders,
            ),
            Table::from_records(REFERRALS_TABLE, &["especialidad", "fecha"], &self.referrals),
            Table::from_records(NURSING_TABLE, &["tipo", "fecha", "detalle"], &self.nursing_events),
        ]
    }

    /// Record counts per event category (patient excluded).
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (STAYS_TABLE, self.stays.len()),
            (PROCEDURES_TABLE, self.procedures.len()),
            (MEDICATIONS_TABLE, self.medications.len()),
            (LAB_ORDERS_TABLE, self.lab_orders.len()),
            (IMAGING_ORDERS_TABLE, self.imaging_orders.len()),
            (REFERRALS_TABLE, self.referrals.len()),
            (NURSING_TABLE, self.nursing_events.len()),
        ]
    }

    /// Total number of event records (patient excluded).
    pub fn record_count(&self) -> usize {
        self.counts().iter().map(|(_, n)| n).sum()
    }
}
