use crate::client::MalClient;
use crate::error::Error;
use crate::model::anime::{AnimeListEntry, AnimeListSort, WatchStatus};
use crate::model::manga::{MangaListEntry, MangaListSort, ReadStatus};
use crate::page::PagedResults;
use crate::request::QuerySpec;

const LIST_LIMIT_MAX: u32 = 1000;

/// A user's anime list, `@me` for the authenticated user.
pub struct UserAnimeListQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> UserAnimeListQuery<'a> {
    pub(crate) fn new(client: &'a MalClient, username: &str) -> Self {
        Self {
            client,
            spec: QuerySpec::get(format!("users/{username}/animelist")),
        }
    }

    /// Restrict the listing to one watch status.
    pub fn status(mut self, status: WatchStatus) -> Self {
        self.spec.set_param("status", status.as_param().to_string());
        self
    }

    pub fn sort(mut self, sort: AnimeListSort) -> Self {
        self.spec.set_param("sort", sort.as_param().to_string());
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.spec.fields = fields.into_iter().collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.spec.set_limit(limit, LIST_LIMIT_MAX);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.spec.set_offset(offset);
        self
    }

    pub async fn search(self) -> Result<PagedResults<'a, AnimeListEntry>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}

/// A user's manga list, `@me` for the authenticated user.
pub struct UserMangaListQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> UserMangaListQuery<'a> {
    pub(crate) fn new(client: &'a MalClient, username: &str) -> Self {
        Self {
            client,
            spec: QuerySpec::get(format!("users/{username}/mangalist")),
        }
    }

    /// Restrict the listing to one read status.
    pub fn status(mut self, status: ReadStatus) -> Self {
        self.spec.set_param("status", status.as_param().to_string());
        self
    }

    pub fn sort(mut self, sort: MangaListSort) -> Self {
        self.spec.set_param("sort", sort.as_param().to_string());
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.spec.fields = fields.into_iter().collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.spec.set_limit(limit, LIST_LIMIT_MAX);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.spec.set_offset(offset);
        self
    }

    pub async fn search(self) -> Result<PagedResults<'a, MangaListEntry>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}
