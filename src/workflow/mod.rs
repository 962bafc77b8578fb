pub mod record_flow;

pub use record_flow::{ProcessResult, RecordFlow};
