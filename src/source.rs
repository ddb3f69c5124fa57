//! Word-list sources and the fetchers that retrieve them.
//!
//! A source is identified by a string, usually a URL. The
//! [`ListBuilder`](crate::builder::ListBuilder) only depends on the
//! [`Fetcher`] trait, so the transport is pluggable:
//!
//! | Fetcher | Handles |
//! |---------|---------|
//! | [`HttpFetcher`] | `http://` and `https://` URLs |
//! | [`FileFetcher`] | `file://` URIs and plain paths |
//! | [`StaticFetcher`] | an in-memory map, for tests and offline runs |
//! | [`RoutingFetcher`] | dispatches by scheme to HTTP or file |

pub mod config;
pub mod fetcher;
pub mod file;
pub mod fixed;
pub mod http;
pub mod routing;

pub use config::{DEFAULT_SOURCES, SourceConfig};
pub use fetcher::Fetcher;
pub use file::FileFetcher;
pub use fixed::StaticFetcher;
pub use http::HttpFetcher;
pub use routing::RoutingFetcher;
