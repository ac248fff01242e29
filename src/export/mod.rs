//! Export orchestration: value transforms, row schemas and table output

pub mod config;
pub mod format;
pub mod pipeline;
pub mod rows;
pub mod tables;

pub use config::ExportConfig;
pub use pipeline::{finish_run, ExportPipeline, ExportSummary};
pub use tables::{FileTables, MemoryTables, Table, TableSink};
