//! Entity models for API responses.
//!
//! These are attribute bags: every field the caller did not request (or the
//! API did not populate) is `None`.

use serde::Deserialize;

pub mod anime;
pub mod forum;
pub mod manga;
pub mod user;

/// Cover art in the API's two standard sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct Picture {
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeTitles {
    pub en: Option<String>,
    pub ja: Option<String>,
    pub synonyms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Element of a search-style listing: the entity sits under a `node` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Node<T> {
    pub node: T,
}

/// Rank of an entry in a ranking listing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RankingInfo {
    pub rank: u32,
    pub previous_rank: Option<u32>,
}
