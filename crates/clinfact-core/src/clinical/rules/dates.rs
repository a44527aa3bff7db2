//! Date lookup helpers.
//!
//! Dates are returned exactly as written; nothing here checks that they are
//! real calendar dates.

use super::patterns::{DATE, DATE_TIME};

/// First `DD/MM/YYYY` in the text.
pub fn first_date(text: &str) -> Option<String> {
    DATE.captures(text).map(|caps| caps[1].to_string())
}

/// Last `DD/MM/YYYY HH:MM:SS` in the text.
pub fn last_date_time(text: &str) -> Option<String> {
    DATE_TIME.find_iter(text).last().map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_date() {
        assert_eq!(
            first_date("Orden 12 del 05/03/2024 y 06/03/2024"),
            Some("05/03/2024".to_string())
        );
        assert_eq!(first_date("sin fecha"), None);
    }

    #[test]
    fn test_malformed_date_passes_through() {
        assert_eq!(first_date("fecha 99/99/0000"), Some("99/99/0000".to_string()));
    }

    #[test]
    fn test_last_date_time_needs_seconds() {
        let text = "01/01/2024 10:00:00 ingreso\n02/01/2024 15:30:00 salida\nnota 03/01/2024 11:00";

        assert_eq!(last_date_time(text), Some("02/01/2024 15:30:00".to_string()));
        assert_eq!(last_date_time("01/01/2024 10:00"), None);
    }
}
