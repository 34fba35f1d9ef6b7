use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::auth::Authenticator;
use crate::error::Error;
use crate::fields::Fields;
use crate::model::anime::{Anime, AnimeRankingType, Season};
use crate::model::forum::{ForumBoards, ForumCategory, ForumTopicDetail};
use crate::model::manga::{Manga, MangaRankingType};
use crate::model::user::User;
use crate::page::{Page, PageEntity, PagedResults};
use crate::query::anime::{
    AnimeRankingQuery, AnimeSearchQuery, AnimeSeasonQuery, AnimeSuggestionQuery,
};
use crate::query::forum::ForumSearchQuery;
use crate::query::list_update::{AnimeListUpdate, MangaListUpdate};
use crate::query::manga::{MangaRankingQuery, MangaSearchQuery};
use crate::query::user_list::{UserAnimeListQuery, UserMangaListQuery};
use crate::request::{self, QuerySpec, DEFAULT_BASE_URL};
use crate::response;

/// MyAnimeList API v2 client.
///
/// The single entry point for every resource accessor. Owns the
/// [`Authenticator`]; query dispatch takes `&self`, token refresh takes
/// `&mut self`, so concurrent refreshes are ruled out by ownership rather
/// than internal locking.
pub struct MalClient {
    auth: Authenticator,
    http: Client,
    base_url: String,
}

impl MalClient {
    /// Create a client around an authenticator.
    pub fn new(auth: Authenticator) -> Self {
        Self {
            auth,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from a pre-issued OAuth token.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self::new(Authenticator::with_token(access_token))
    }

    /// Override the API base URL. Used by tests to point requests at a
    /// mock server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    /// Refresh the OAuth token. A no-op for a static-token client; fails
    /// with [`Error::AuthRefreshFailed`] if the token endpoint round trip
    /// fails, leaving the previous token in place.
    pub async fn refresh_token(&mut self) -> Result<(), Error> {
        self.auth.refresh().await
    }

    // ── Pipeline ────────────────────────────────────────────────

    /// Run one request and return the raw status and body. No retry, no
    /// implicit refresh; a 401 surfaces to the caller, who may refresh and
    /// re-issue.
    async fn execute(&self, spec: &QuerySpec) -> Result<(u16, Vec<u8>), Error> {
        let token = self.auth.current_token()?;
        let req = request::build(&self.http, &self.base_url, spec, token)?;
        tracing::debug!(method = %req.method(), url = %req.url(), "dispatching API request");

        let resp = self.http.execute(req).await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            tracing::warn!(status, "MAL API error");
        }
        let body = resp.bytes().await?;
        Ok((status, body.to_vec()))
    }

    pub(crate) async fn fetch_entity<T: DeserializeOwned>(
        &self,
        spec: &QuerySpec,
    ) -> Result<T, Error> {
        let (status, body) = self.execute(spec).await?;
        response::decode_entity(status, &body)
    }

    async fn fetch_data_entity<T: DeserializeOwned>(&self, spec: &QuerySpec) -> Result<T, Error> {
        let (status, body) = self.execute(spec).await?;
        response::decode_data_entity(status, &body)
    }

    pub(crate) async fn fetch_page<W: DeserializeOwned>(
        &self,
        spec: &QuerySpec,
    ) -> Result<Page<W>, Error> {
        let (status, body) = self.execute(spec).await?;
        response::decode_page(status, &body)
    }

    pub(crate) async fn fetch_paged<T: PageEntity>(
        &self,
        spec: QuerySpec,
    ) -> Result<PagedResults<'_, T>, Error> {
        let page = self.fetch_page::<T::Wire>(&spec).await?;
        Ok(PagedResults::new(self, spec, page))
    }

    async fn execute_no_content(&self, spec: &QuerySpec) -> Result<(), Error> {
        let (status, body) = self.execute(spec).await?;
        response::check_status(status, &body)
    }

    // ── Anime ───────────────────────────────────────────────────

    /// Anime search query builder.
    pub fn anime(&self) -> AnimeSearchQuery<'_> {
        AnimeSearchQuery::new(self)
    }

    /// Full anime details with the API's default field projection.
    pub async fn get_anime(&self, id: u64) -> Result<Anime, Error> {
        self.get_anime_with_fields(id, &Fields::new()).await
    }

    /// Anime details restricted to the requested fields.
    pub async fn get_anime_with_fields(&self, id: u64, fields: &Fields) -> Result<Anime, Error> {
        let mut spec = QuerySpec::get(format!("anime/{id}"));
        spec.fields = fields.clone();
        self.fetch_entity(&spec).await
    }

    pub fn anime_ranking(&self, ranking_type: AnimeRankingType) -> AnimeRankingQuery<'_> {
        AnimeRankingQuery::new(self, ranking_type)
    }

    pub fn anime_season(&self, year: u32, season: Season) -> AnimeSeasonQuery<'_> {
        AnimeSeasonQuery::new(self, year, season)
    }

    pub fn anime_suggestions(&self) -> AnimeSuggestionQuery<'_> {
        AnimeSuggestionQuery::new(self)
    }

    /// List-entry updater for one anime; single-shot, no pagination.
    pub fn update_anime_list(&self, id: u64) -> AnimeListUpdate<'_> {
        AnimeListUpdate::new(self, id)
    }

    /// Remove an anime from the authenticated user's list.
    pub async fn delete_anime_list(&self, id: u64) -> Result<(), Error> {
        let spec = QuerySpec::delete(format!("anime/{id}/my_list_status"));
        self.execute_no_content(&spec).await
    }

    /// The authenticated user's anime list.
    pub fn my_anime_list(&self) -> UserAnimeListQuery<'_> {
        UserAnimeListQuery::new(self, "@me")
    }

    /// Another user's anime list.
    pub fn user_anime_list(&self, username: &str) -> UserAnimeListQuery<'_> {
        UserAnimeListQuery::new(self, username)
    }

    // ── Manga ───────────────────────────────────────────────────

    /// Manga search query builder.
    pub fn manga(&self) -> MangaSearchQuery<'_> {
        MangaSearchQuery::new(self)
    }

    /// Full manga details with the API's default field projection.
    pub async fn get_manga(&self, id: u64) -> Result<Manga, Error> {
        self.get_manga_with_fields(id, &Fields::new()).await
    }

    /// Manga details restricted to the requested fields.
    pub async fn get_manga_with_fields(&self, id: u64, fields: &Fields) -> Result<Manga, Error> {
        let mut spec = QuerySpec::get(format!("manga/{id}"));
        spec.fields = fields.clone();
        self.fetch_entity(&spec).await
    }

    pub fn manga_ranking(&self, ranking_type: MangaRankingType) -> MangaRankingQuery<'_> {
        MangaRankingQuery::new(self, ranking_type)
    }

    /// List-entry updater for one manga; single-shot, no pagination.
    pub fn update_manga_list(&self, id: u64) -> MangaListUpdate<'_> {
        MangaListUpdate::new(self, id)
    }

    /// Remove a manga from the authenticated user's list.
    pub async fn delete_manga_list(&self, id: u64) -> Result<(), Error> {
        let spec = QuerySpec::delete(format!("manga/{id}/my_list_status"));
        self.execute_no_content(&spec).await
    }

    /// The authenticated user's manga list.
    pub fn my_manga_list(&self) -> UserMangaListQuery<'_> {
        UserMangaListQuery::new(self, "@me")
    }

    /// Another user's manga list.
    pub fn user_manga_list(&self, username: &str) -> UserMangaListQuery<'_> {
        UserMangaListQuery::new(self, username)
    }

    // ── User ────────────────────────────────────────────────────

    /// The authenticated user's profile.
    pub async fn get_myself(&self) -> Result<User, Error> {
        self.get_user("@me").await
    }

    pub async fn get_myself_with_fields(&self, fields: &Fields) -> Result<User, Error> {
        self.get_user_with_fields("@me", fields).await
    }

    /// A user's profile by username.
    pub async fn get_user(&self, username: &str) -> Result<User, Error> {
        self.get_user_with_fields(username, &Fields::new()).await
    }

    pub async fn get_user_with_fields(
        &self,
        username: &str,
        fields: &Fields,
    ) -> Result<User, Error> {
        let mut spec = QuerySpec::get(format!("users/{username}"));
        spec.fields = fields.clone();
        self.fetch_entity(&spec).await
    }

    // ── Forum ───────────────────────────────────────────────────

    /// The top-level forum boards.
    pub async fn forum_boards(&self) -> Result<Vec<ForumCategory>, Error> {
        let spec = QuerySpec::get("forum/boards");
        let boards: ForumBoards = self.fetch_entity(&spec).await?;
        Ok(boards.categories)
    }

    /// A forum topic with its posts.
    pub async fn get_forum_topic_detail(&self, id: u64) -> Result<ForumTopicDetail, Error> {
        let spec = QuerySpec::get(format!("forum/topic/{id}"));
        self.fetch_data_entity(&spec).await
    }

    /// A forum topic with its posts, with explicit pagination parameters.
    #[deprecated(note = "the API accepts limit and offset here but currently ignores them")]
    pub async fn get_forum_topic_detail_paged(
        &self,
        id: u64,
        limit: u32,
        offset: u32,
    ) -> Result<ForumTopicDetail, Error> {
        let mut spec = QuerySpec::get(format!("forum/topic/{id}"));
        spec.set_limit(limit, 100);
        spec.set_offset(offset);
        self.fetch_data_entity(&spec).await
    }

    /// Forum topic search query builder.
    pub fn forum_topics(&self) -> ForumSearchQuery<'_> {
        ForumSearchQuery::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::anime::WatchStatus;
    use wiremock::matchers::{
        body_string_contains, header, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MalClient {
        MalClient::with_token("test-token").base_url(server.uri())
    }

    #[tokio::test]
    async fn test_get_anime_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime/42"))
            .and(query_param("fields", "id,title"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 42, "title": "X"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let fields: Fields = ["id", "title"].into_iter().collect();
        let anime = client.get_anime_with_fields(42, &fields).await.unwrap();
        assert_eq!(anime.id, 42);
        assert_eq!(anime.title, "X");
    }

    #[tokio::test]
    async fn test_get_anime_omits_fields_param_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime/42"))
            .and(query_param_is_missing("fields"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 42, "title": "X"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.get_anime(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_401_maps_to_invalid_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime/42"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "invalid_token"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_anime(42).await.unwrap_err();
        assert!(matches!(err, Error::InvalidAuth(_)));
    }

    #[tokio::test]
    async fn test_search_follows_next_cursor_exactly_once() {
        let server = MockServer::start().await;
        let next_url = format!("{}/anime?q=frieren&offset=2", server.uri());

        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param("q", "frieren"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"node": {"id": 1, "title": "a"}},
                    {"node": {"id": 2, "title": "b"}}
                ],
                "paging": {"next": next_url}
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param("q", "frieren"))
            .and(query_param("offset", "2"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"node": {"id": 3, "title": "c"}}],
                "paging": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut results = client.anime().query("frieren").search().await.unwrap();

        let mut ids = Vec::new();
        while let Some(anime) = results.try_next().await.unwrap() {
            ids.push(anime.id);
        }
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_search_without_next_terminates_after_buffer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"node": {"id": 1, "title": "only"}}],
                "paging": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut results = client.anime().query("only").search().await.unwrap();
        assert!(!results.has_next_page());
        assert_eq!(results.try_next().await.unwrap().unwrap().id, 1);
        assert!(results.try_next().await.unwrap().is_none());
        // The mock's expect(1) verifies no further request was issued.
    }

    #[tokio::test]
    async fn test_later_page_failure_surfaces_at_advance() {
        let server = MockServer::start().await;
        let next_url = format!("{}/anime?offset=1", server.uri());

        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"node": {"id": 1, "title": "a"}}],
                "paging": {"next": next_url}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param("offset", "1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut results = client.anime().search().await.unwrap();
        // The first page's item is yielded fine.
        assert_eq!(results.try_next().await.unwrap().unwrap().id, 1);
        // The failure shows up only when the boundary is crossed.
        let err = results.try_next().await.unwrap_err();
        assert!(matches!(err, Error::FailedRequest { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_ranking_query_encodes_type_and_yields_ranks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime/ranking"))
            .and(query_param("ranking_type", "airing"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"node": {"id": 5, "title": "top"}, "ranking": {"rank": 1}},
                    {"node": {"id": 6, "title": "second"}, "ranking": {"rank": 2, "previous_rank": 3}}
                ],
                "paging": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let entries = client
            .anime_ranking(AnimeRankingType::Airing)
            .limit(2)
            .search()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ranking.rank, 1);
        assert_eq!(entries[1].ranking.previous_rank, Some(3));
    }

    #[tokio::test]
    async fn test_season_query_path_and_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime/season/2023/fall"))
            .and(query_param("sort", "anime_num_list_users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"node": {"id": 52991, "title": "Sousou no Frieren"}}],
                "paging": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let season = client
            .anime_season(2023, Season::Fall)
            .sort(crate::model::anime::SeasonSort::AnimeNumListUsers)
            .search()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(season[0].id, 52991);
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn test_inert_nsfw_flag_is_still_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param("nsfw", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": [], "paging": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.anime().nsfw(true).search().await.unwrap();
    }

    #[tokio::test]
    async fn test_user_list_filters_and_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/@me/animelist"))
            .and(query_param("status", "watching"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "node": {"id": 52991, "title": "Sousou no Frieren"},
                    "list_status": {"status": "watching", "num_episodes_watched": 14}
                }],
                "paging": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let entries = client
            .my_anime_list()
            .status(WatchStatus::Watching)
            .search()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(entries[0].list_status.num_episodes_watched, Some(14));
    }

    #[tokio::test]
    async fn test_list_update_patches_form_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/anime/52991/my_list_status"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_string_contains("num_watched_episodes=15"))
            .and(body_string_contains("status=watching"))
            .and(body_string_contains("score=9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "watching",
                "score": 9,
                "num_episodes_watched": 15,
                "is_rewatching": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client
            .update_anime_list(52991)
            .status(WatchStatus::Watching)
            .score(9)
            .num_watched_episodes(15)
            .update()
            .await
            .unwrap();
        assert_eq!(status.num_episodes_watched, Some(15));
    }

    #[tokio::test]
    async fn test_delete_list_entry() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/anime/52991/my_list_status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.delete_anime_list(52991).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_entry_is_failed_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/manga/2/my_list_status"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.delete_manga_list(2).await.unwrap_err();
        assert!(matches!(err, Error::FailedRequest { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_forum_boards_unwraps_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forum/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "categories": [
                    {"title": "MyAnimeList", "boards": [
                        {"id": 5, "title": "Updates & Announcements"}
                    ]}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let categories = client.forum_boards().await.unwrap();
        assert_eq!(categories[0].boards[0].id, 5);
    }

    #[tokio::test]
    async fn test_forum_topic_detail_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forum/topic/481"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "title": "Episode discussion",
                    "posts": [{"id": 1, "number": 1, "body": "First!"}]
                },
                "paging": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let detail = client.get_forum_topic_detail(481).await.unwrap();
        assert_eq!(detail.title, "Episode discussion");
        assert_eq!(detail.posts.len(), 1);
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn test_forum_topic_detail_paged_encodes_inert_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forum/topic/481"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"title": "t", "posts": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .get_forum_topic_detail_paged(481, 10, 20)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_forum_topic_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forum/topics"))
            .and(query_param("q", "frieren"))
            .and(query_param("board_id", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": 481, "title": "Frieren discussion"}],
                "paging": {}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let topics = client
            .forum_topics()
            .query("frieren")
            .board_id(5)
            .search()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(topics[0].id, 481);
    }

    #[tokio::test]
    async fn test_get_user_with_statistics_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/Xinil"))
            .and(query_param("fields", "anime_statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "name": "Xinil",
                "anime_statistics": {"num_items": 907, "mean_score": 7.32}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let fields: Fields = ["anime_statistics"].into_iter().collect();
        let user = client.get_user_with_fields("Xinil", &fields).await.unwrap();
        assert_eq!(user.anime_statistics.unwrap().num_items, Some(907));
    }
}
