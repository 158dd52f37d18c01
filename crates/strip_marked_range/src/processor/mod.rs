// crates/strip_marked_range/src/processor/mod.rs

mod file_processor;

pub use file_processor::{
    run_strip, DocumentStore, FsDocumentStore, StripConfig, StripReport,
};
