pub mod api;
pub mod loaders;
pub mod upload;

pub use api::{
    CheckIssue, CheckResponse, FileCheckResult, FileStatus, HealthDependencies, HealthResponse,
    PingResponse, ServiceConfig, Severity,
};
pub use loaders::{load_upload_file, load_upload_files};
pub use upload::{mime_for_extension, FileSource, UploadFile, OFFICE_MIME_TYPES};
