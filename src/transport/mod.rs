//! Network transport for form submissions

mod http;

pub use http::HttpTransport;
