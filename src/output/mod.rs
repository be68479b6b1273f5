//! Report writers for the final wide table.

pub mod csv;
pub mod html;

pub use csv::write_csv;
pub use html::HtmlReportWriter;
