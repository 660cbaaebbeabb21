pub mod file_validator;
pub mod result_exporter;
pub mod result_view;

pub use file_validator::{validate_file, FileVerdict, RejectReason, SelectionLimits};
pub use result_exporter::{export_file_name, export_json, export_results, load_exported};
pub use result_view::{render_results, severity_style, CheckSummary, SeverityStyle};
