//! Common regex patterns for Spanish clinical-record extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::segment::SectionMarker;

lazy_static! {
    // Dates as written in the records: DD/MM/YYYY, optionally with time
    pub static ref DATE: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DATE_TIME: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}"
    ).unwrap();

    // Patient header fields
    pub static ref PATIENT_CC: Regex = Regex::new(
        r"(?i)No\.\s*CC[:\s]*(\d+)"
    ).unwrap();

    pub static ref PATIENT_AGE: Regex = Regex::new(
        r"(?i)Edad actual[:\s]*(\d+)\s*A(?:Ñ|N)OS"
    ).unwrap();

    pub static ref PATIENT_COMPANY: Regex = Regex::new(
        r"(?i)Empresa[:\s]*(.*?)(?:\n|$)"
    ).unwrap();

    pub static ref PATIENT_AFFILIATION: Regex = Regex::new(
        r"(?i)Afiliado[:\s]*(.*?)(?:\n|$)"
    ).unwrap();

    // Stays
    pub static ref HOSPITAL_ADMISSION: Regex = Regex::new(
        r"(?i)FECHA\s+(\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2})\s+TIPO DE ATENCI[OÓ]N\s*:\s*HOSPITALIZACI[OÓ]N"
    ).unwrap();

    pub static ref ICU_ADMISSION: Regex = Regex::new(
        r"(?i)INGRESO A UNIDAD DE CUIDADOS (?:INTERMEDIOS|INTENSIVOS).*?(\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2})"
    ).unwrap();

    pub static ref ICU_TRANSFER: Regex = Regex::new(
        r"(?i)TRASLAD(?:O|A|ADO|ADA)\s+A\s+(?:LA\s+)?(?:UNIDAD DE CUIDADOS INTENSIVOS|UCI)\b.*?(\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2})"
    ).unwrap();

    // Medication list: "<cantidad> <descripcion>" followed by a detail line
    pub static ref MEDICATION_HEADER: Regex = Regex::new(
        r"^\s*(\d+\.?\d*)\s+(.*?)(?:\s+\d+|\s*$)"
    ).unwrap();

    pub static ref MEDICATION_DOSE: Regex = Regex::new(
        r"Dosis:\s*(.*?)(?:\s+V[ií]a|\s*$)"
    ).unwrap();

    pub static ref MEDICATION_ROUTE: Regex = Regex::new(
        r"V[ií]a\s+(.*?)(?:\s+Frecuencia|\s*$)"
    ).unwrap();

    pub static ref MEDICATION_FREQUENCY: Regex = Regex::new(
        r"Frecuencia\s+(.*?)(?:\s+Estado|\s*$)"
    ).unwrap();

    // Lab and imaging order lines: "<n> <nombre> [Interpretado|En proceso|Cancelado]"
    pub static ref ORDER_LINE: Regex = Regex::new(
        r"(?i)^\s*\d+\s+(.+?)(?:\s+(?:Interpretado|En\s+proceso|Cancelado)|\s*$)"
    ).unwrap();

    // Section markers
    pub static ref MEDICATION_MARKER: SectionMarker =
        SectionMarker::new("FORMULA MEDICA ESTANDAR").unwrap();

    pub static ref LAB_ORDERS_MARKER: SectionMarker =
        SectionMarker::new("ORDENES DE LABORATORIO").unwrap();

    pub static ref IMAGING_ORDERS_MARKER: SectionMarker =
        SectionMarker::new("ORDENES DE IMAGENES DIAGNOSTICAS").unwrap();

    pub static ref REFERRAL_MARKER: SectionMarker =
        SectionMarker::new("INTERCONSULTA POR:").unwrap();
}
