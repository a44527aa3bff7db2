//! Service stay (admission/discharge) extraction.
//!
//! Pairing is heuristic. The discharge is the last full timestamp in the
//! document and is always attributed to intensive care, which only holds
//! when intensive care was the final service.

use super::dates::last_date_time;
use super::patterns::{HOSPITAL_ADMISSION, ICU_ADMISSION, ICU_TRANSFER};
use super::{capture_trimmed, RecordExtractor};
use crate::models::records::{ServiceKind, StayEvent, StayEventKind};

pub struct StayExtractor;

impl StayExtractor {
    pub fn new() -> Self {
        Self
    }

    fn hospital_admission(&self, text: &str) -> Option<StayEvent> {
        capture_trimmed(&HOSPITAL_ADMISSION, text)
            .map(|ts| StayEvent::new(ServiceKind::Hospitalizacion, StayEventKind::Ingreso, ts))
    }

    fn icu_admission(&self, text: &str) -> Option<StayEvent> {
        // Direct admission is checked before transfer notes
        capture_trimmed(&ICU_ADMISSION, text)
            .or_else(|| capture_trimmed(&ICU_TRANSFER, text))
            .map(|ts| StayEvent::new(ServiceKind::Uci, StayEventKind::Ingreso, ts))
    }

    fn icu_discharge(&self, text: &str) -> Option<StayEvent> {
        last_date_time(text).map(|ts| StayEvent::new(ServiceKind::Uci, StayEventKind::Egreso, ts))
    }
}

impl Default for StayExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for StayExtractor {
    type Output = Vec<StayEvent>;

    fn extract(&self, text: &str) -> Vec<StayEvent> {
        [
            self.hospital_admission(text),
            self.icu_admission(text),
            self.icu_discharge(text),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
