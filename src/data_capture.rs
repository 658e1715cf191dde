pub mod logger;
pub mod types;

pub use logger::CaptureLog;
pub use types::CaptureRecord;
