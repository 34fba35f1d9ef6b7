use serde::Deserialize;

/// A MyAnimeList user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub joined_at: Option<String>,
    pub time_zone: Option<String>,
    pub is_supporter: Option<bool>,
    pub anime_statistics: Option<UserAnimeStatistics>,
}

/// Aggregate anime-watching statistics, present only when the
/// `anime_statistics` field was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAnimeStatistics {
    pub num_items_watching: Option<u32>,
    pub num_items_completed: Option<u32>,
    pub num_items_on_hold: Option<u32>,
    pub num_items_dropped: Option<u32>,
    pub num_items_plan_to_watch: Option<u32>,
    pub num_items: Option<u32>,
    pub num_days_watched: Option<f32>,
    pub num_days_watching: Option<f32>,
    pub num_days_completed: Option<f32>,
    pub num_days_on_hold: Option<f32>,
    pub num_days_dropped: Option<f32>,
    pub num_days: Option<f32>,
    pub num_episodes: Option<u32>,
    pub num_times_rewatched: Option<u32>,
    pub mean_score: Option<f32>,
}
