//! Lab and imaging order extraction.
//!
//! Both sections share one line format, so a single extractor is
//! parameterized by section marker and order kind.

use super::dates::first_date;
use super::patterns::{IMAGING_ORDERS_MARKER, LAB_ORDERS_MARKER, ORDER_LINE};
use super::segment::SectionMarker;
use super::{capture_trimmed, RecordExtractor};
use crate::models::records::{OrderKind, OrderRecord};

#[derive(Debug, Clone)]
pub struct OrderExtractor {
    kind: OrderKind,
    marker: SectionMarker,
}

impl OrderExtractor {
    pub fn new(kind: OrderKind, marker: SectionMarker) -> Self {
        Self { kind, marker }
    }

    /// Orders listed under `ORDENES DE LABORATORIO`.
    pub fn laboratory() -> Self {
        Self::new(OrderKind::Laboratorio, LAB_ORDERS_MARKER.clone())
    }

    /// Orders listed under `ORDENES DE IMAGENES DIAGNOSTICAS`.
    pub fn imaging() -> Self {
        Self::new(OrderKind::Imagen, IMAGING_ORDERS_MARKER.clone())
    }

    fn parse_line(&self, line: &str) -> Option<OrderRecord> {
        let name = capture_trimmed(&ORDER_LINE, line)?;
        Some(OrderRecord {
            kind: self.kind,
            name,
            date: first_date(line),
            line: line.trim().to_string(),
        })
    }
}

impl RecordExtractor for OrderExtractor {
    type Output = Vec<OrderRecord>;

    fn extract(&self, text: &str) -> Vec<OrderRecord> {
        self.marker
            .segment(text)
            .into_iter()
            .flat_map(|block| block.lines().filter_map(|line| self.parse_line(line)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LABS: &str = "ORDENES DE LABORATORIO\n\
        Fecha de la orden: 05/01/2024\n\
        1 HEMOGRAMA COMPLETO 05/01/2024 Interpretado\n\
        2 CREATININA EN SUERO En proceso\n\
        3 PROTEINA C REACTIVA CANCELADO\n\
        4 GLUCOSA\n\
        texto libre\n";

    #[test]
    fn test_lab_orders() {
        let records = OrderExtractor::laboratory().extract(LABS);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["HEMOGRAMA COMPLETO 05/01/2024", "CREATININA EN SUERO", "PROTEINA C REACTIVA", "GLUCOSA"]
        );
        assert_eq!(records[0].date.as_deref(), Some("05/01/2024"));
        assert_eq!(records[0].line, "1 HEMOGRAMA COMPLETO 05/01/2024 Interpretado");
        assert_eq!(records[1].date, None);
        assert!(records.iter().all(|r| r.kind == OrderKind::Laboratorio));
    }

    #[test]
    fn test_imaging_uses_own_marker() {
        let text = "ORDENES DE IMAGENES DIAGNOSTICAS\n1 RADIOGRAFIA DE TORAX 06/01/2024 Interpretado\n";

        assert!(OrderExtractor::laboratory().extract(text).is_empty());

        let records = OrderExtractor::imaging().extract(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, OrderKind::Imagen);
        assert_eq!(records[0].name, "RADIOGRAFIA DE TORAX 06/01/2024");
    }

    #[test]
    fn test_twin_extractors_agree_on_same_lines() {
        let lab_text = LABS.to_string();
        let img_text = LABS.replace("ORDENES DE LABORATORIO", "ORDENES DE IMAGENES DIAGNOSTICAS");

        let labs = OrderExtractor::laboratory().extract(&lab_text);
        let imaging = OrderExtractor::imaging().extract(&img_text);

        assert_eq!(labs.len(), imaging.len());
        for (lab, img) in labs.iter().zip(&imaging) {
            assert_eq!(lab.name, img.name);
            assert_eq!(lab.date, img.date);
            assert_eq!(lab.line, img.line);
        }
    }

    #[test]
    fn test_lines_before_marker_ignored() {
        let text = "1 NO ES ORDEN\nordenes de laboratorio\n7 TSH\n";
        let records = OrderExtractor::laboratory().extract(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "TSH");
    }
}
