pub mod handlers;
mod http;

pub use http::*;
