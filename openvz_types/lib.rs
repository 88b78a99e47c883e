pub mod container;
pub mod errors;

pub use errors::Result;
