//! # Imageboard Query
//!
//! imageboard_query is a typed client for searching popular imageboard (booru) APIs.
//!
//! Searches are described with a [`FilterSpec`], validated and encoded into a request URL,
//! fetched through a [`Transport`] and decoded into a uniform [`ResultSet`], regardless of the
//! server speaking gelbooru-style XML or e621-style JSON. A [`Paginator`] walks multi-page
//! results until the server runs out of entries.
//!
//! ```no_run
//! use imageboard_query::{BooruClient, FilterSpec, PostFilter, DEFAULT_SERVERS};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = DEFAULT_SERVERS.get("gelbooru").cloned().unwrap_or_default();
//! let client = BooruClient::new(server)?;
//!
//! let filter = FilterSpec::Posts(PostFilter {
//!     tags: vec!["1girl".to_string(), "solo".to_string()],
//!     limit: Some(100),
//!     ..Default::default()
//! });
//!
//! let mut pages = client.paginate(filter);
//! while let Some(page) = pages.next_page().await? {
//!     println!("Got {} posts", page.len());
//! }
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod imageboards;

// Export server configuration
pub use config::{ConfigError, ServerConfig, DEFAULT_SERVERS};

// Export the client and its collaborators
pub use imageboards::auth::AuthToken;
pub use imageboards::client::BooruClient;
pub use imageboards::decoder::{decoder_for, Decoder, JsonDecoder, XmlDecoder};
pub use imageboards::entry::{Comment, Entry, PageInfo, ResultSet, Tag, User};
pub use imageboards::error::{DecodeCause, DecodeError, QueryError, TransportError};
pub use imageboards::filter::{
    CommentFilter, FilterSpec, JsonPostFilter, PostFilter, TagFilter, TagOrder, UserFilter,
};
pub use imageboards::paginator::{PageState, Paginator};
pub use imageboards::post::{rating::Rating, tags::TagType, Post};
pub use imageboards::query::build_query;
pub use imageboards::transport::{HttpTransport, Transport};
pub use imageboards::{BackendKind, WireFormat};
