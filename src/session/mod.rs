pub mod editor;
pub mod notify;
