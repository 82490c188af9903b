//! State management for the diff viewer.

mod deferred;
mod expansion;
mod viewer_state;

pub use deferred::{DeferredTasks, TaskHandle};
pub use expansion::{
    auto_expand, auto_expand_cap, ExpansionState, AUTO_EXPAND_MAX_CHANGES,
    DEFAULT_AUTO_EXPAND_CAP, LARGE_PR_AUTO_EXPAND_CAP, LARGE_PR_FILE_COUNT,
};
pub use viewer_state::{DiffViewerState, FileKey};
