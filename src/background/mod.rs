pub mod resolve;
pub mod swatch;
