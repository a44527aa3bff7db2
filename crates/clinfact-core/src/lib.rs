//! Core library for extracting billable events from Spanish clinical records.
//!
//! This crate provides:
//! - Rule-based extraction of patient fields, stays, procedures, medications,
//!   lab and imaging orders, interconsultations and nursing events
//! - Typed record models renderable as report tables
//! - Document loading from plain text, digital PDF text, or an external OCR tool

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod source;
pub mod clinical;

pub use error::{ClinfactError, Result};
pub use models::document::{Document, SourceKind};
pub use models::records::{
    ImagingOrderRecord, LabOrderRecord, MedicationRecord, NursingEventKind, NursingEventRecord,
    OrderKind, OrderRecord, PatientField, PatientRecord, ProcedureRecord, ReferralRecord,
    ServiceKind, StayEvent, StayEventKind,
};
pub use models::report::{ExtractionReport, ReportMetadata, Table, TableRow};
pub use clinical::{ExtractionEngine, RecordExtractor};
pub use source::load_document;
