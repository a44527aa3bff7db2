//! Section segmentation by marker strings.

use regex::Regex;

/// A case-insensitive section header.
///
/// Whitespace inside the marker matches any run of whitespace, including
/// line breaks, and the marker may occur anywhere within a line.
#[derive(Debug, Clone)]
pub struct SectionMarker {
    pattern: Regex,
}

impl SectionMarker {
    pub fn new(literal: &str) -> Result<Self, regex::Error> {
        let body = literal
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let pattern = Regex::new(&format!("(?i){}", body))?;

        Ok(Self { pattern })
    }

    /// Blocks of text following each marker occurrence.
    ///
    /// Each block runs up to the next occurrence or the end of the text and
    /// excludes the marker itself. Text before the first occurrence is not
    /// part of any block. No occurrence yields no blocks.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let spans: Vec<(usize, usize)> = self
            .pattern
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        spans
            .iter()
            .enumerate()
            .map(|(i, &(_, end))| {
                let stop = spans.get(i + 1).map(|&(start, _)| start).unwrap_or(text.len());
                &text[end..stop]
            })
            .collect()
    }

}

/// Split `text` into blocks introduced by `marker`.
pub fn segment<'a>(text: &'a str, marker: &SectionMarker) -> Vec<&'a str> {
    marker.segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_marker_no_blocks() {
        let marker = SectionMarker::new("ORDENES DE LABORATORIO").unwrap();
        assert!(marker.segment("texto sin secciones").is_empty());
        assert!(marker.segment("").is_empty());
    }

    #[test]
    fn test_blocks_exclude_marker_and_prefix() {
        let marker = SectionMarker::new("INTERCONSULTA POR:").unwrap();
        let text = "encabezado\nINTERCONSULTA POR: CARDIOLOGIA\nnota\ninterconsulta por: NEUMOLOGIA";

        let blocks = segment(text, &marker);
        assert_eq!(blocks, vec![" CARDIOLOGIA\nnota\n", " NEUMOLOGIA"]);
    }

    #[test]
    fn test_variable_whitespace_and_mid_line() {
        let marker = SectionMarker::new("FORMULA MEDICA ESTANDAR").unwrap();
        let text = "x Formula   Medica\nEstandar 1 A\nFORMULA MEDICA ESTANDAR";

        let blocks = marker.segment(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], " 1 A\n");
        assert_eq!(blocks[1], "");
    }

    #[test]
    fn test_marker_special_characters_are_literal() {
        let marker = SectionMarker::new("No. (A)").unwrap();
        assert_eq!(marker.segment("xNo. (A)y No: (A)z"), vec!["y No: (A)z"]);
    }
}
