//! Interconsultation (referral) extraction.

use super::dates::first_date;
use super::patterns::REFERRAL_MARKER;
use super::RecordExtractor;
use crate::models::records::ReferralRecord;

pub struct ReferralExtractor;

impl ReferralExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReferralExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for ReferralExtractor {
    type Output = Vec<ReferralRecord>;

    fn extract(&self, text: &str) -> Vec<ReferralRecord> {
        REFERRAL_MARKER
            .segment(text)
            .into_iter()
            .map(|block| ReferralRecord {
                // Rest of the marker line
                specialty: block.lines().next().unwrap_or_default().trim().to_string(),
                // Anywhere in the block, not only the first line
                date: first_date(block),
            })
            .collect()
    }
}
