//! Events emitted by the diff viewer for the parent application to handle.

use crate::render::ViewType;

/// Events emitted by the diff viewer state.
///
/// The diff viewer is instrumented: it emits events instead of performing
/// side effects directly. The parent application decides what to do with
/// them (re-render a file, scroll, persist a preference).
///
/// # Example
///
/// ```ignore
/// for event in state.handle_action(DiffAction::SelectFile(3)) {
///     match event {
///         DiffEvent::FileExpanded { file_index } => rerender(file_index),
///         DiffEvent::ScrollToFile { file_path, .. } => scroll_into_view(&file_path),
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEvent {
    /// A file body became materialized.
    FileExpanded {
        /// Index of the file in the files list.
        file_index: usize,
    },

    /// A file body was reduced to its header.
    FileCollapsed {
        /// Index of the file in the files list.
        file_index: usize,
    },

    /// Bulk expansion change.
    ExpansionChanged {
        /// Number of files now expanded.
        expanded_count: usize,
    },

    /// A tree directory was opened or closed.
    DirectoryToggled {
        /// Slash-joined directory path.
        path: String,
        /// New state.
        expanded: bool,
    },

    /// The tree's directory set changed wholesale.
    TreeChanged,

    /// Bring a file into view. Always follows its expansion.
    ScrollToFile {
        /// Path of the selected file.
        file_path: String,
        /// Index of the file in the files list.
        file_index: usize,
    },

    /// Layout switched.
    ViewTypeChanged(ViewType),
}
