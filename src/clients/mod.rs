pub mod check_client;

pub use check_client::{CheckBackend, CheckClient, FILES_FIELD};
