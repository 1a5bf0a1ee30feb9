//! Record transformation

pub mod flatten;

pub use flatten::flatten_object;
