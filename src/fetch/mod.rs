//! Fetcher: blocking retrieval of remote URLs and local paths.

pub mod fetcher;
pub mod http;
pub mod transport;

pub use fetcher::{Fetcher, IMAGE_FETCH_ATTEMPTS};
pub use http::HttpTransport;
pub use transport::{is_remote, Content, FetchMode, Transport};
