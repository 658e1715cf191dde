pub mod client_addr;

pub use client_addr::resolve_source_address;
