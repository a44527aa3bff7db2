//! Rule-based record extractors for Spanish clinical records.

pub mod dates;
pub mod medications;
pub mod nursing;
pub mod orders;
pub mod patient;
pub mod patterns;
pub mod procedures;
pub mod referrals;
pub mod segment;
pub mod stays;

pub use dates::{first_date, last_date_time};
pub use medications::MedicationExtractor;
pub use nursing::{NursingExtractor, ADMINISTRATION_KEYWORD, TRANSFUSION_KEYWORD};
pub use orders::OrderExtractor;
pub use patient::PatientExtractor;
pub use procedures::{ProcedureExtractor, PROCEDURE_KEYWORDS};
pub use referrals::ReferralExtractor;
pub use segment::{segment, SectionMarker};
pub use stays::StayExtractor;

/// Trait for record extractors.
///
/// Extractors are total: any input text, including the empty string,
/// yields a well-formed (possibly empty) output, and the same text always
/// yields the same output.
pub trait RecordExtractor {
    /// What one extraction pass produces.
    type Output;

    /// Extract from the full document text.
    fn extract(&self, text: &str) -> Self::Output;
}

/// Trimmed first capture group, `None` when absent or blank.
pub(crate) fn capture_trimmed(re: &regex::Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
