//! Client side of the footprint search backend
//!
//! Sends the multipart search request, classifies failures into the messages
//! shown to the user, and pages through the returned results.

pub mod client;
pub mod errors;
pub mod pagination;
pub mod retry;
pub mod types;

pub use client::SearchClient;
pub use errors::{SearchError, SearchResult};
pub use pagination::{Page, PageLink, page_window, paginate};
pub use retry::RetryPolicy;
pub use types::{
    FootprintResult, HIGH_CONFIDENCE_SCORE, ResultStats, SearchRequest, SearchResponse,
};
