pub mod selection;
pub mod view_state;

pub use selection::{FileSelection, SelectionOutcome, SelectionWarning};
pub use view_state::{update, Effect, Event, UiError, UiErrorKind, ViewState};
