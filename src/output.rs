//! Output formatters (human status lines and JSONL)

pub mod jsonl;
pub mod status;

pub use jsonl::{BumpRecord, RecordStatus};
pub use status::{Console, Status};
