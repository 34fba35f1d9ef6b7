use serde::Deserialize;

use crate::model::{AlternativeTitles, Genre, Node, Picture, RankingInfo};
use crate::page::PageEntity;

/// Anime details.
#[derive(Debug, Clone, Deserialize)]
pub struct Anime {
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
    pub num_episodes: Option<u32>,
    pub start_season: Option<StartSeason>,
    pub broadcast: Option<Broadcast>,
    pub source: Option<String>,
    pub average_episode_duration: Option<u32>,
    pub rating: Option<String>,
    pub pictures: Option<Vec<Picture>>,
    pub background: Option<String>,
    pub related_anime: Option<Vec<RelatedAnime>>,
    pub recommendations: Option<Vec<AnimeRecommendation>>,
    pub studios: Option<Vec<Studio>>,
    pub statistics: Option<AnimeStatistics>,
    pub my_list_status: Option<AnimeListStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSeason {
    pub year: u32,
    pub season: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Broadcast {
    pub day_of_the_week: Option<String>,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Studio {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedAnime {
    pub node: Anime,
    pub relation_type: String,
    pub relation_type_formatted: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimeRecommendation {
    pub node: Anime,
    pub num_recommendations: Option<u32>,
}

/// Community watch-status tallies. The API reports these counts as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeStatistics {
    pub num_list_users: Option<u64>,
    pub status: Option<AnimeStatisticsStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimeStatisticsStatus {
    pub watching: Option<String>,
    pub completed: Option<String>,
    pub on_hold: Option<String>,
    pub dropped: Option<String>,
    pub plan_to_watch: Option<String>,
}

/// The authenticated user's list entry for an anime.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeListStatus {
    pub status: Option<String>,
    pub score: Option<u8>,
    pub num_episodes_watched: Option<u32>,
    pub is_rewatching: Option<bool>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub priority: Option<u8>,
    pub num_times_rewatched: Option<u32>,
    pub rewatch_value: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

/// Element yielded by ranking listings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeRankingEntry {
    pub node: Anime,
    pub ranking: RankingInfo,
}

/// Element yielded by user anime list listings.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeListEntry {
    pub node: Anime,
    pub list_status: AnimeListStatus,
}

impl PageEntity for Anime {
    type Wire = Node<Anime>;

    fn from_wire(wire: Self::Wire) -> Self {
        wire.node
    }
}

impl PageEntity for AnimeRankingEntry {
    type Wire = Self;

    fn from_wire(wire: Self::Wire) -> Self {
        wire
    }
}

impl PageEntity for AnimeListEntry {
    type Wire = Self;

    fn from_wire(wire: Self::Wire) -> Self {
        wire
    }
}

// ── Query enums ─────────────────────────────────────────────────

/// Ranking board to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeRankingType {
    All,
    Airing,
    Upcoming,
    Tv,
    Ova,
    Movie,
    Special,
    ByPopularity,
    Favorite,
}

impl AnimeRankingType {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::Tv => "tv",
            Self::Ova => "ova",
            Self::Movie => "movie",
            Self::Special => "special",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }
}

/// Airing season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: &[Season] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        use chrono::Datelike;
        let month = chrono::Utc::now().month();
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

/// Sort order for season listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonSort {
    AnimeScore,
    AnimeNumListUsers,
}

impl SeasonSort {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::AnimeScore => "anime_score",
            Self::AnimeNumListUsers => "anime_num_list_users",
        }
    }
}

/// Watch status on a user's anime list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl WatchStatus {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::PlanToWatch => "plan_to_watch",
        }
    }
}

/// Sort order for user anime list listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeListSort {
    ListScore,
    ListUpdatedAt,
    AnimeTitle,
    AnimeStartDate,
    AnimeId,
}

impl AnimeListSort {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::ListScore => "list_score",
            Self::ListUpdatedAt => "list_updated_at",
            Self::AnimeTitle => "anime_title",
            Self::AnimeStartDate => "anime_start_date",
            Self::AnimeId => "anime_id",
        }
    }
}
