pub mod arrangement;
