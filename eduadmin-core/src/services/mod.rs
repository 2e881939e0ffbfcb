//! 业务逻辑服务层

mod controller;
mod dialog_state;
mod list_state;
mod search_state;

pub use controller::{ControllerBuilder, ListResourceController};
pub use dialog_state::{ConfirmationController, DialogController};
pub use list_state::ListState;
pub use search_state::SearchState;
