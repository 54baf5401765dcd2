pub mod download;
pub mod exporter;
pub mod host;
