pub mod kind;

pub use eqt_error::Error;
