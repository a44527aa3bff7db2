//! Report rendering: JSON, combined CSV and plain-text review.

use clinfact_core::models::config::ExportConfig;
use clinfact_core::models::records::PatientField;
use clinfact_core::models::report::PATIENT_TABLE;
use clinfact_core::{ExtractionReport, Table};

use crate::commands::process::OutputFormat;

const CATEGORY_COLUMN: &str = "categoria";
const FILE_COLUMN: &str = "archivo";
const MISSING: &str = "N/A";

pub fn format_report(
    report: &ExtractionReport,
    format: OutputFormat,
    export: &ExportConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => combined_csv([(None, report)], export.delimiter_byte()?),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

/// Union of every table's columns, in first-seen order.
fn union_columns(tables: &[Table]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for column in tables.iter().flat_map(|t| t.columns.iter()) {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
    columns
}

/// All tables of all reports in one sheet.
///
/// Each row is tagged with its table name (and file, when given); cells
/// outside the row's own table columns stay empty.
pub fn combined_csv<'a, I>(reports: I, delimiter: u8) -> anyhow::Result<String>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a ExtractionReport)>,
{
    let reports: Vec<(Option<&str>, &ExtractionReport)> = reports.into_iter().collect();
    let with_file = reports.iter().any(|(file, _)| file.is_some());

    let columns = union_columns(&ExtractionReport::default().tables());

    let mut header: Vec<&str> = Vec::new();
    if with_file {
        header.push(FILE_COLUMN);
    }
    header.push(CATEGORY_COLUMN);
    header.extend(columns.iter().map(String::as_str));

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(vec![]);
    wtr.write_record(&header)?;

    for (file, report) in reports {
        for table in report.tables() {
            for row in &table.rows {
                let mut cells = vec![String::new(); columns.len()];
                for (column, value) in table.columns.iter().zip(row) {
                    if let Some(idx) = columns.iter().position(|c| c == column) {
                        cells[idx] = value.clone();
                    }
                }

                let mut record: Vec<String> = Vec::with_capacity(header.len());
                if with_file {
                    record.push(file.unwrap_or_default().to_string());
                }
                record.push(table.name.clone());
                record.extend(cells);
                wtr.write_record(&record)?;
            }
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    if let Some(source) = &report.metadata.source {
        output.push_str(&format!("Documento: {}\n\n", source));
    }

    output.push_str("Paciente:\n");
    for field in PatientField::ALL {
        output.push_str(&format!(
            "  {}: {}\n",
            field.label(),
            report.patient.get(field).unwrap_or(MISSING)
        ));
    }

    for table in report.tables().iter().filter(|t| t.name != PATIENT_TABLE) {
        output.push('\n');
        output.push_str(&format!("{} ({}):\n", table.name, table.len()));

        if table.is_empty() {
            output.push_str("  sin registros\n");
            continue;
        }

        output.push_str(&format!("  {}\n", table.columns.join(" | ")));
        for row in &table.rows {
            output.push_str(&format!("  {}\n", row.join(" | ")));
        }
    }

    if !report.metadata.warnings.is_empty() {
        output.push_str("\nAdvertencias:\n");
        for warning in &report.metadata.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinfact_core::ExtractionEngine;

    const TEXT: &str = "No. CC: 123456\n\
                        Edad actual: 45 AÑOS\n\
                        FORMULA MEDICA ESTANDAR\n\
                        2 ACETAMINOFEN\n\
                        Dosis: 500mg Via ORAL Frecuencia CADA 8 HORAS\n";

    #[test]
    fn test_combined_csv_layout() {
        let report = ExtractionEngine::new().extract(TEXT);
        let csv = combined_csv([(None, &report)], b',').unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "categoria,CC,Edad,Empresa,Afiliado,servicio,tipo,fecha,procedimiento,descripcion,\
             cantidad,medicamento,dosis,via,frecuencia,examen,linea,estudio,especialidad,detalle"
        );
        assert_eq!(lines[1], format!("paciente,123456,45{}", ",".repeat(17)));
        assert_eq!(
            lines[2],
            format!("medicamentos{}2,ACETAMINOFEN,500mg,ORAL,CADA 8 HORAS{}", ",".repeat(10), ",".repeat(5))
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_combined_csv_with_files() {
        let report = ExtractionEngine::new().extract("No. CC: 1");
        let csv = combined_csv([(Some("a.txt"), &report), (Some("b.txt"), &report)], b';').unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[0].starts_with("archivo;categoria;CC"));
        assert!(lines[1].starts_with("a.txt;paciente;1"));
        assert!(lines[2].starts_with("b.txt;paciente;1"));
    }

    #[test]
    fn test_text_uses_display_defaults() {
        let report = ExtractionEngine::new().extract(TEXT);
        let text = format_text(&report);

        assert!(text.contains("  CC: 123456\n"));
        assert!(text.contains("  Empresa: N/A\n"));
        assert!(text.contains("medicamentos (1):"));
        assert!(text.contains("  2 | ACETAMINOFEN | 500mg | ORAL | CADA 8 HORAS\n"));
        assert!(text.contains("estancias (0):\n  sin registros\n"));
    }
}
