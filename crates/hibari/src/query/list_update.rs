use crate::client::MalClient;
use crate::error::Error;
use crate::model::anime::{AnimeListStatus, WatchStatus};
use crate::model::manga::{MangaListStatus, ReadStatus};
use crate::request::QuerySpec;

/// Update of the authenticated user's list entry for one anime.
///
/// The PATCH is an upsert: a missing entry is created. Only explicitly set
/// fields are sent; everything else keeps its server-side value. The call
/// returns the updated list status.
pub struct AnimeListUpdate<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> AnimeListUpdate<'a> {
    pub(crate) fn new(client: &'a MalClient, id: u64) -> Self {
        Self {
            client,
            spec: QuerySpec::patch(format!("anime/{id}/my_list_status")),
        }
    }

    pub fn status(mut self, status: WatchStatus) -> Self {
        self.spec.set_form("status", status.as_param().to_string());
        self
    }

    pub fn is_rewatching(mut self, rewatching: bool) -> Self {
        self.spec.set_form("is_rewatching", rewatching.to_string());
        self
    }

    /// Score from 0 to 10; 0 clears the score.
    pub fn score(mut self, score: u8) -> Self {
        self.spec.set_form("score", score.min(10).to_string());
        self
    }

    pub fn num_watched_episodes(mut self, episodes: u32) -> Self {
        self.spec
            .set_form("num_watched_episodes", episodes.to_string());
        self
    }

    /// Priority from 0 (low) to 2 (high).
    pub fn priority(mut self, priority: u8) -> Self {
        self.spec.set_form("priority", priority.min(2).to_string());
        self
    }

    pub fn num_times_rewatched(mut self, count: u32) -> Self {
        self.spec
            .set_form("num_times_rewatched", count.to_string());
        self
    }

    /// Rewatch value from 0 to 5.
    pub fn rewatch_value(mut self, value: u8) -> Self {
        self.spec
            .set_form("rewatch_value", value.min(5).to_string());
        self
    }

    pub fn tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let joined = tags
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        self.spec.set_form("tags", joined);
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.spec.set_form("comments", comments.into());
        self
    }

    pub async fn update(self) -> Result<AnimeListStatus, Error> {
        self.client.fetch_entity(&self.spec).await
    }
}

/// Update of the authenticated user's list entry for one manga.
pub struct MangaListUpdate<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> MangaListUpdate<'a> {
    pub(crate) fn new(client: &'a MalClient, id: u64) -> Self {
        Self {
            client,
            spec: QuerySpec::patch(format!("manga/{id}/my_list_status")),
        }
    }

    pub fn status(mut self, status: ReadStatus) -> Self {
        self.spec.set_form("status", status.as_param().to_string());
        self
    }

    pub fn is_rereading(mut self, rereading: bool) -> Self {
        self.spec.set_form("is_rereading", rereading.to_string());
        self
    }

    /// Score from 0 to 10; 0 clears the score.
    pub fn score(mut self, score: u8) -> Self {
        self.spec.set_form("score", score.min(10).to_string());
        self
    }

    pub fn num_volumes_read(mut self, volumes: u32) -> Self {
        self.spec.set_form("num_volumes_read", volumes.to_string());
        self
    }

    pub fn num_chapters_read(mut self, chapters: u32) -> Self {
        self.spec
            .set_form("num_chapters_read", chapters.to_string());
        self
    }

    /// Priority from 0 (low) to 2 (high).
    pub fn priority(mut self, priority: u8) -> Self {
        self.spec.set_form("priority", priority.min(2).to_string());
        self
    }

    pub fn num_times_reread(mut self, count: u32) -> Self {
        self.spec.set_form("num_times_reread", count.to_string());
        self
    }

    /// Reread value from 0 to 5.
    pub fn reread_value(mut self, value: u8) -> Self {
        self.spec.set_form("reread_value", value.min(5).to_string());
        self
    }

    pub fn tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let joined = tags
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        self.spec.set_form("tags", joined);
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.spec.set_form("comments", comments.into());
        self
    }

    pub async fn update(self) -> Result<MangaListStatus, Error> {
        self.client.fetch_entity(&self.spec).await
    }
}
