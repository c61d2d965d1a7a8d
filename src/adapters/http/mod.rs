pub mod client;
pub mod fetcher;

pub use client::{build_client, ClientOptions};
pub use fetcher::{FetchedPage, Fetcher};
