//! Comma-delimited export of the wide table (`--savedf`).
//!
//! Values are written in full precision; undefined percent diffs become empty
//! cells. Fields containing delimiters, quotes, or newlines are quoted.

use crate::core::WideReportTable;
use anyhow::Result;
use std::borrow::Cow;
use std::io::Write;

pub fn write_csv<W: Write>(writer: &mut W, table: &WideReportTable) -> Result<()> {
    let header: Vec<Cow<'_, str>> = table
        .column_names()
        .into_iter()
        .map(|c| Cow::Owned(escape_field(&c).into_owned()))
        .collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in &table.rows {
        let mut fields: Vec<String> = vec![
            escape_field(&row.key.metric_name).into_owned(),
            escape_field(&row.key.metric_metadata).into_owned(),
            escape_field(&row.summary_name).into_owned(),
            escape_field(&row.key.slicer_name).into_owned(),
            escape_field(&row.full_name).into_owned(),
            format_number(row.baseline_value),
        ];
        for value in &row.values {
            fields.push(format_number(*value));
        }
        for pct in &row.percent_diffs {
            fields.push(pct.map(format_number).unwrap_or_default());
        }
        writeln!(writer, "{}", fields.join(","))?;
    }

    Ok(())
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
