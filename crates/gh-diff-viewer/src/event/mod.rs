//! Events emitted by the viewer.

mod diff_event;

pub use diff_event::DiffEvent;
