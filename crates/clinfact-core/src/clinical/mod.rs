//! Clinical record extraction module.

mod engine;
pub mod rules;

pub use engine::ExtractionEngine;
pub use rules::RecordExtractor;
