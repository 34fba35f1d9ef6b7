use crate::client::MalClient;
use crate::error::Error;
use crate::model::manga::{Manga, MangaRankingEntry, MangaRankingType};
use crate::page::PagedResults;
use crate::request::QuerySpec;

const SEARCH_LIMIT_MAX: u32 = 100;
const RANKING_LIMIT_MAX: u32 = 500;

/// Manga search over the whole catalog.
pub struct MangaSearchQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> MangaSearchQuery<'a> {
    pub(crate) fn new(client: &'a MalClient) -> Self {
        Self {
            client,
            spec: QuerySpec::get("manga"),
        }
    }

    /// Search term.
    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.spec.set_param("q", q.into());
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
        self.spec.set_limit(limit, SEARCH_LIMIT_MAX);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.spec.set_offset(offset);
        self
    }

    #[deprecated(note = "the API accepts this parameter but currently ignores it")]
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.spec.set_param("nsfw", nsfw.to_string());
        self
    }

    pub async fn search(self) -> Result<PagedResults<'a, Manga>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}

/// Manga ranking listing for one ranking board.
pub struct MangaRankingQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> MangaRankingQuery<'a> {
    pub(crate) fn new(client: &'a MalClient, ranking_type: MangaRankingType) -> Self {
        let mut spec = QuerySpec::get("manga/ranking");
        spec.set_param("ranking_type", ranking_type.as_param().to_string());
        Self { client, spec }
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
        self.spec.set_limit(limit, RANKING_LIMIT_MAX);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.spec.set_offset(offset);
        self
    }

    #[deprecated(note = "the API accepts this parameter but currently ignores it")]
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.spec.set_param("nsfw", nsfw.to_string());
        self
    }

    pub async fn search(self) -> Result<PagedResults<'a, MangaRankingEntry>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}
