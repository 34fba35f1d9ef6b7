//! Typed, async client for the MyAnimeList API v2.
//!
//! Construct a [`MalClient`] from a pre-issued OAuth token or an
//! [`Authenticator`], then use the resource accessors:
//!
//! ```no_run
//! # async fn run() -> Result<(), hibari::Error> {
//! let client = hibari::MalClient::with_token("token");
//!
//! let anime = client.get_anime(52991).await?;
//!
//! let mut results = client.anime().query("frieren").limit(10).search().await?;
//! while let Some(anime) = results.try_next().await? {
//!     println!("{}", anime.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Token refresh is caller-triggered: on an [`Error::InvalidAuth`] response,
//! call [`MalClient::refresh_token`] and re-issue the query.

pub mod auth;
pub mod client;
pub mod error;
pub mod fields;
pub mod model;
pub mod page;
pub mod query;

mod request;
mod response;

pub use auth::Authenticator;
pub use client::MalClient;
pub use error::Error;
pub use fields::Fields;
pub use page::{Page, PagedResults};
