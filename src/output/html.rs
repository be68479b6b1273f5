//! Interactive HTML rendering of the wide table.
//!
//! The page is self-contained: the table rows are embedded as JSON and
//! rendered client-side, with three dropdown selectors (metric name, metric
//! metadata, summary name) that re-filter visible rows. Numeric columns are
//! formatted to four decimal places; identity columns are left as-is.

use crate::core::{WideReportTable, IDENTITY_COLUMNS};
use anyhow::Result;
use chrono::Local;
use html_escape::encode_text;
use serde_json::{json, Map, Value};
use std::io::Write;

pub struct HtmlReportWriter<W: Write> {
    writer: W,
    template: &'static str,
}

impl<W: Write> HtmlReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            template: include_str!("templates/report.html"),
        }
    }

    pub fn write_report(&mut self, table: &WideReportTable, title: &str) -> Result<()> {
        let html = self.render(table, title)?;
        write!(self.writer, "{}", html)?;
        Ok(())
    }

    fn render(&self, table: &WideReportTable, title: &str) -> Result<String> {
        let json_data = serde_json::to_string(&report_data(table))?;
        let escaped_json = encode_text(&json_data);

        let html = self
            .template
            .replace("{{{TITLE}}}", &encode_text(title))
            .replace("{{{BASELINE_RUN}}}", &encode_text(&table.baseline_run))
            .replace("{{{ROW_COUNT}}}", &table.rows.len().to_string())
            .replace("{{{RUN_COUNT}}}", &table.runs.len().to_string())
            .replace(
                "{{{TIMESTAMP}}}",
                &Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            )
            .replace("{{{JSON_DATA}}}", &escaped_json);

        Ok(html)
    }
}

/// The payload embedded in the page: ordered column names, the identity
/// columns (rendered as text), and one object per row keyed by column name.
/// Undefined percent diffs serialize as `null`.
fn report_data(table: &WideReportTable) -> Value {
    let columns = table.column_names();
    let rows: Vec<Value> = table.rows.iter().map(|row| {
        let mut obj = Map::new();
        obj.insert("metricName".to_string(), json!(row.key.metric_name));
        obj.insert("metricMetadata".to_string(), json!(row.key.metric_metadata));
        obj.insert("summaryName".to_string(), json!(row.summary_name));
        obj.insert("slicerName".to_string(), json!(row.key.slicer_name));
        obj.insert("fullName".to_string(), json!(row.full_name));
        obj.insert(table.baseline_run.clone(), json!(row.baseline_value));
        for (run, value) in table.runs.iter().zip(&row.values) {
            obj.insert(run.clone(), json!(value));
        }
        for (run, pct) in table.runs.iter().zip(&row.percent_diffs) {
            obj.insert(format!("%_{run}"), json!(pct));
        }
        Value::Object(obj)
    }).collect();

    json!({
        "columns": columns,
        "identity": IDENTITY_COLUMNS,
        "rows": rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MetricKey, WideRow};

    fn sample_table() -> WideReportTable {
        let key = MetricKey {
            metric_name: "NVisits".to_string(),
            metric_metadata: "All Visits".to_string(),
            slicer_name: "UniSlicer".to_string(),
        };
        WideReportTable {
            baseline_run: "base".to_string(),
            runs: vec!["run_a".to_string()],
            rows: vec![WideRow {
                full_name: key.full_name("Count"),
                key,
                summary_name: "Count".to_string(),
                baseline_value: 1000.0,
                values: vec![1100.0],
                percent_diffs: vec![Some(9.0909)],
            }],
        }
    }

    #[test]
    fn report_data_keys_rows_by_column_name() {
        let data = report_data(&sample_table());
        let row = &data["rows"][0];
        assert_eq!(row["metricName"], "NVisits");
        assert_eq!(row["base"], 1000.0);
        assert_eq!(row["run_a"], 1100.0);
        assert_eq!(row["%_run_a"], 9.0909);
    }

    #[test]
    fn undefined_percent_diff_serializes_as_null() {
        let mut table = sample_table();
        table.rows[0].percent_diffs = vec![None];
        let data = report_data(&table);
        assert!(data["rows"][0]["%_run_a"].is_null());
    }

    #[test]
    fn rendered_page_embeds_escaped_data_and_title() {
        let mut buf = Vec::new();
        let mut writer = HtmlReportWriter::new(&mut buf);
        writer
            .write_report(&sample_table(), "comparison <test>")
            .unwrap();
        let html = String::from_utf8(buf).unwrap();

        assert!(html.contains("comparison &lt;test&gt;"));
        assert!(html.contains("NVisits"));
        // raw angle brackets from the data must not survive into the page
        assert!(!html.contains("{{{JSON_DATA}}}"));
        assert!(!html.contains("{{{TITLE}}}"));
    }
}
