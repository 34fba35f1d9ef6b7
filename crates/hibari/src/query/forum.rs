use crate::client::MalClient;
use crate::error::Error;
use crate::model::forum::{ForumSort, ForumTopic};
use crate::page::PagedResults;
use crate::request::QuerySpec;

const TOPIC_LIMIT_MAX: u32 = 100;

/// Forum topic search.
pub struct ForumSearchQuery<'a> {
    client: &'a MalClient,
    spec: QuerySpec,
}

impl<'a> ForumSearchQuery<'a> {
    pub(crate) fn new(client: &'a MalClient) -> Self {
        Self {
            client,
            spec: QuerySpec::get("forum/topics"),
        }
    }

    /// Search term matched against topic titles.
    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.spec.set_param("q", q.into());
        self
    }

    pub fn board_id(mut self, board_id: u64) -> Self {
        self.spec.set_param("board_id", board_id.to_string());
        self
    }

    pub fn subboard_id(mut self, subboard_id: u64) -> Self {
        self.spec.set_param("subboard_id", subboard_id.to_string());
        self
    }

    /// Restrict to topics started by this user.
    pub fn topic_user_name(mut self, name: impl Into<String>) -> Self {
        self.spec.set_param("topic_user_name", name.into());
        self
    }

    /// Restrict to topics this user posted in.
    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.spec.set_param("user_name", name.into());
        self
    }

    pub fn sort(mut self, sort: ForumSort) -> Self {
        self.spec.set_param("sort", sort.as_param().to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.spec.set_limit(limit, TOPIC_LIMIT_MAX);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.spec.set_offset(offset);
        self
    }

    pub async fn search(self) -> Result<PagedResults<'a, ForumTopic>, Error> {
        self.client.fetch_paged(self.spec).await
    }
}
