// Export service. CSV is rendered in-process; PDF and XLSX are not wired up
// in this build and return a typed error so the frontend can say so instead
// of silently going back to idle.

use crate::error::SalonError;
use crate::types::{ExportArtifact, ExportFormat, MetricPoint, RangeKey};

fn range_slug(range: RangeKey) -> &'static str {
    match range {
        RangeKey::Today => "today",
        RangeKey::Week => "week",
        RangeKey::Month => "month",
    }
}

/// Render the metric series for `range` into a downloadable artifact.
pub fn export_report(
    format: ExportFormat,
    range: RangeKey,
    series: &[MetricPoint],
) -> Result<ExportArtifact, SalonError> {
    match format {
        ExportFormat::Csv => Ok(ExportArtifact {
            file_name: format!("analytics_report_{}.csv", range_slug(range)),
            mime_type: "text/csv".to_string(),
            contents: render_csv(series),
        }),
        ExportFormat::Pdf | ExportFormat::Xlsx => Err(SalonError::ExportUnsupported(format)),
    }
}

fn render_csv(series: &[MetricPoint]) -> String {
    let mut out = String::from("label,messages,satisfaction,appointments,revenue\n");
    for p in series {
        // Labels are fixture-controlled and never contain commas or quotes.
        out.push_str(&format!(
            "{},{},{:.1},{},{}\n",
            p.label, p.messages, p.satisfaction, p.appointments, p.revenue
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::metric_series;

    #[test]
    fn test_csv_has_header_plus_one_row_per_point() {
        let series = metric_series(RangeKey::Today);
        let artifact = export_report(ExportFormat::Csv, RangeKey::Today, &series).unwrap();
        assert_eq!(artifact.file_name, "analytics_report_today.csv");
        assert_eq!(artifact.mime_type, "text/csv");
        let lines: Vec<&str> = artifact.contents.trim_end().lines().collect();
        assert_eq!(lines.len(), series.len() + 1);
        assert_eq!(lines[0], "label,messages,satisfaction,appointments,revenue");
        assert_eq!(lines[1], "09:00,15,4.2,3,180");
    }

    #[test]
    fn test_unsupported_formats_return_typed_error() {
        let series = metric_series(RangeKey::Week);
        for format in [ExportFormat::Pdf, ExportFormat::Xlsx] {
            match export_report(format, RangeKey::Week, &series) {
                Err(SalonError::ExportUnsupported(f)) => assert_eq!(f, format),
                other => panic!("expected unsupported-format error, got {:?}", other.map(|a| a.file_name)),
            }
        }
    }
}
