use crate::client::MalClient;
use crate::error::Error;
use crate::model::anime::{Anime, AnimeRankingEntry, AnimeRankingType, Season, SeasonSort};
use crate::page::PagedResults;
use crate::request::QuerySpec;

const SEARCH_LIMIT_MAX: u32 = 100;
const RANKING_LIMIT_MAX: u32 = 500;
const SEASON_LIMIT_MAX: u32 = 500;
const SUGGESTION_LIMIT_MAX: u32 = 100;

/// Anime search over the whole catalog.
pub struct AnimeSearchQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> AnimeSearchQuery<'a> {
    pub(crate) fn new(client: &'a MalClient) -> Self {
        Self {
            client,
            spec: QuerySpec::get("anime"),
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

    pub async fn search(self) -> Result<PagedResults<'a, Anime>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}

/// Anime ranking listing for one ranking board.
pub struct AnimeRankingQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> AnimeRankingQuery<'a> {
    pub(crate) fn new(client: &'a MalClient, ranking_type: AnimeRankingType) -> Self {
        let mut spec = QuerySpec::get("anime/ranking");
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

    pub async fn search(self) -> Result<PagedResults<'a, AnimeRankingEntry>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}

/// Seasonal anime listing for one year and season.
pub struct AnimeSeasonQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> AnimeSeasonQuery<'a> {
    pub(crate) fn new(client: &'a MalClient, year: u32, season: Season) -> Self {
        Self {
            client,
            spec: QuerySpec::get(format!("anime/season/{year}/{}", season.as_param())),
        }
    }

    pub fn sort(mut self, sort: SeasonSort) -> Self {
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
        self.spec.set_limit(limit, SEASON_LIMIT_MAX);
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

    pub async fn search(self) -> Result<PagedResults<'a, Anime>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}

/// Personalized anime suggestions for the authenticated user.
pub struct AnimeSuggestionQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> AnimeSuggestionQuery<'a> {
    pub(crate) fn new(client: &'a MalClient) -> Self {
        Self {
            client,
            spec: QuerySpec::get("anime/suggestions"),
        }
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
        self.spec.set_limit(limit, SUGGESTION_LIMIT_MAX);
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

    pub async fn search(self) -> Result<PagedResults<'a, Anime>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}
