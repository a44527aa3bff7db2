//! Record types produced by the clinical extractors.
//!
//! Every record is a read-only view over the source text. Fields that the
//! rules could not locate are `None`; display defaults belong to whoever
//! renders the records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Patient demographic fields located in the document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    /// Citizenship card number (No. CC).
    Cc,
    /// Current age in years.
    Edad,
    /// Paying company (EPS).
    Empresa,
    /// Affiliation status.
    Afiliado,
}

impl PatientField {
    pub const ALL: [PatientField; 4] = [Self::Cc, Self::Edad, Self::Empresa, Self::Afiliado];

    /// Column label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Edad => "Edad",
            Self::Empresa => "Empresa",
            Self::Afiliado => "Afiliado",
        }
    }
}

/// Patient demographics. Exactly one per document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "CC", skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    #[serde(rename = "Edad", skip_serializing_if = "Option::is_none")]
    pub edad: Option<String>,

    #[serde(rename = "Empresa", skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,

    #[serde(rename = "Afiliado", skip_serializing_if = "Option::is_none")]
    pub afiliado: Option<String>,
}

impl PatientRecord {
    pub fn get(&self, field: PatientField) -> Option<&str> {
        match field {
            PatientField::Cc => self.cc.as_deref(),
            PatientField::Edad => self.edad.as_deref(),
            PatientField::Empresa => self.empresa.as_deref(),
            PatientField::Afiliado => self.afiliado.as_deref(),
        }
    }

    pub fn set(&mut self, field: PatientField, value: Option<String>) {
        let slot = match field {
            PatientField::Cc => &mut self.cc,
            PatientField::Edad => &mut self.edad,
            PatientField::Empresa => &mut self.empresa,
            PatientField::Afiliado => &mut self.afiliado,
        };
        *slot = value;
    }

    /// Fixed-key view where unmatched fields map to the empty string.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        PatientField::ALL
            .iter()
            .map(|f| (f.label().to_string(), self.get(*f).unwrap_or_default().to_string()))
            .collect()
    }

    /// True when no field was found.
    pub fn is_empty(&self) -> bool {
        PatientField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Hospital service a stay event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceKind {
    /// General hospitalization.
    Hospitalizacion,
    /// Intensive or intermediate care unit.
    Uci,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospitalizacion => "HOSPITALIZACION",
            Self::Uci => "UCI",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admission or discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StayEventKind {
    Ingreso,
    Egreso,
}

impl StayEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingreso => "INGRESO",
            Self::Egreso => "EGRESO",
        }
    }
}

impl fmt::Display for StayEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admission or discharge of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayEvent {
    #[serde(rename = "servicio")]
    pub service: ServiceKind,

    #[serde(rename = "tipo")]
    pub kind: StayEventKind,

    /// Timestamp exactly as written in the document.
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

impl StayEvent {
    pub fn new(service: ServiceKind, kind: StayEventKind, timestamp: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            timestamp: timestamp.into(),
        }
    }

    /// Interpret the timestamp as `DD/MM/YYYY HH:MM[:SS]`.
    ///
    /// Returns `None` for timestamps that are not calendar-valid.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let normalized = self.timestamp.split_whitespace().collect::<Vec<_>>().join(" ");
        NaiveDateTime::parse_from_str(&normalized, "%d/%m/%Y %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%d/%m/%Y %H:%M"))
            .ok()
    }
}

/// A billable procedure mentioned on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    /// Canonical vocabulary keyword.
    #[serde(rename = "procedimiento")]
    pub procedure: String,

    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Trimmed source line.
    #[serde(rename = "descripcion")]
    pub line: String,
}

/// A prescribed medication assembled from a header line and a detail line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    #[serde(rename = "cantidad")]
    pub quantity: String,

    #[serde(rename = "medicamento")]
    pub medication: String,

    #[serde(rename = "dosis", skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,

    #[serde(rename = "via", skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(rename = "frecuencia", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Which order section a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Laboratory exam order.
    Laboratorio,
    /// Diagnostic imaging study order.
    Imagen,
}

impl OrderKind {
    /// Column label for the exam/study name.
    pub fn name_column(&self) -> &'static str {
        match self {
            Self::Laboratorio => "examen",
            Self::Imagen => "estudio",
        }
    }
}

/// A lab or imaging order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "tipo")]
    pub kind: OrderKind,

    /// Exam or study name.
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Trimmed source line.
    #[serde(rename = "linea")]
    pub line: String,
}

pub type LabOrderRecord = OrderRecord;
pub type ImagingOrderRecord = OrderRecord;

/// An interconsultation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRecord {
    /// Target specialty; empty when the marker ends its line.
    #[serde(rename = "especialidad")]
    pub specialty: String,

    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NursingEventKind {
    Transfusion,
    Administracion,
}

impl NursingEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfusion => "TRANSFUSION",
            Self::Administracion => "ADMINISTRACION",
        }
    }
}

impl fmt::Display for NursingEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nursing-note line recording a transfusion or an administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursingEventRecord {
    #[serde(rename = "tipo")]
    pub kind: NursingEventKind,

    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(rename = "detalle")]
    pub detail: String,
}
