//! View state: value types, the coordinator that owns them, and the UI session around it.

pub mod app_state;
pub mod types;
pub mod view_state;

pub use app_state::AppState;
pub use types::{DerivedView, Record, SortKey, ViewParameters, ViewStatus};
pub use view_state::ViewState;
