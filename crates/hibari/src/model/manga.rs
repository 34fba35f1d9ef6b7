use serde::Deserialize;

use crate::model::{AlternativeTitles, Genre, Node, Picture, RankingInfo};
use crate::page::PageEntity;

/// Manga details.
#[derive(Debug, Clone, Deserialize)]
pub struct Manga {
    pub id: u64,
    pub title: String,
    pub main_picture: Option<Picture>,
    pub alternative_titles: Option<AlternativeTitles>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub synopsis: Option<String>,
    pub mean: Option<f32>,
    pub rank: Option<u32>,
    pub popularity: Option<u32>,
    pub num_list_users: Option<u64>,
    pub num_scoring_users: Option<u64>,
    pub nsfw: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub media_type: Option<String>,
    pub status: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub num_volumes: Option<u32>,
    pub num_chapters: Option<u32>,
    pub authors: Option<Vec<Author>>,
    pub pictures: Option<Vec<Picture>>,
    pub background: Option<String>,
    pub related_manga: Option<Vec<RelatedManga>>,
    pub recommendations: Option<Vec<MangaRecommendation>>,
    pub serialization: Option<Vec<Serialization>>,
    pub my_list_status: Option<MangaListStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub node: Person,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedManga {
    pub node: Manga,
    pub relation_type: String,
    pub relation_type_formatted: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaRecommendation {
    pub node: Manga,
    pub num_recommendations: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Serialization {
    pub node: Magazine,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Magazine {
    pub id: u64,
    pub name: String,
}

/// The authenticated user's list entry for a manga.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaListStatus {
    pub status: Option<String>,
    pub score: Option<u8>,
    pub num_volumes_read: Option<u32>,
    pub num_chapters_read: Option<u32>,
    pub is_rereading: Option<bool>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub priority: Option<u8>,
    pub num_times_reread: Option<u32>,
    pub reread_value: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

/// Element yielded by ranking listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaRankingEntry {
    pub node: Manga,
    pub ranking: RankingInfo,
}

/// Element yielded by user manga list listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaListEntry {
    pub node: Manga,
    pub list_status: MangaListStatus,
}

impl PageEntity for Manga {
    type Wire = Node<Manga>;

    fn from_wire(wire: Self::Wire) -> Self {
        wire.node
    }
}

impl PageEntity for MangaRankingEntry {
    type Wire = Self;

    fn from_wire(wire: Self::Wire) -> Self {
        wire
    }
}

impl PageEntity for MangaListEntry {
    type Wire = Self;

    fn from_wire(wire: Self::Wire) -> Self {
        wire
    }
}

// ── Query enums ─────────────────────────────────────────────────

/// Ranking board to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MangaRankingType {
    All,
    Manga,
    Novels,
    Oneshots,
    Doujin,
    Manhwa,
    Manhua,
    ByPopularity,
    Favorite,
}

impl MangaRankingType {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Manga => "manga",
            Self::Novels => "novels",
            Self::Oneshots => "oneshots",
            Self::Doujin => "doujin",
            Self::Manhwa => "manhwa",
            Self::Manhua => "manhua",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }
}

/// Read status on a user's manga list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    Reading,
    Completed,
    OnHold,
    Dropped,
    PlanToRead,
}

impl ReadStatus {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::PlanToRead => "plan_to_read",
        }
    }
}

/// Sort order for user manga list listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MangaListSort {
    ListScore,
    ListUpdatedAt,
    MangaTitle,
    MangaStartDate,
    MangaId,
}

impl MangaListSort {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::ListScore => "list_score",
            Self::ListUpdatedAt => "list_updated_at",
            Self::MangaTitle => "manga_title",
            Self::MangaStartDate => "manga_start_date",
            Self::MangaId => "manga_id",
        }
    }
}
