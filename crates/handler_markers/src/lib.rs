// crates/handler_markers/src/lib.rs

//! Built-in target and markers used by `remove_handlers` when nothing is
//! supplied on the command line or in the environment.

/// File whose resize handlers get stripped.
pub const DEFAULT_TARGET_PATH: &str =
    r"c:\GitRepos\TheBlackBox\src\components\widgets\WidgetCanvas.tsx";

/// First line of the removed range (inclusive).
pub const START_MARKER: &str = "onResizeStart={() => startAutoScroll()}";

/// First line kept after the removed range.
pub const END_MARKER: &str = "onDragStop={(e, d) => {";
