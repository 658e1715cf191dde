pub mod configuration;
pub use configuration::Config;

pub mod error_handling;

pub mod network;
pub use network::resolve_source_address;

pub mod data_capture;
pub use data_capture::{CaptureLog, CaptureRecord};

pub mod web_interface;
pub use web_interface::web_server::WebServer;
