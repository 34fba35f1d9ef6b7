use serde::Deserialize;

use crate::page::PageEntity;

/// Wire shape of the forum boards endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumBoards {
    pub categories: Vec<ForumCategory>,
}

/// Top-level forum category grouping a set of boards.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumCategory {
    pub title: String,
    pub boards: Vec<ForumBoard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumBoard {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub subboards: Option<Vec<ForumSubboard>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumSubboard {
    pub id: u64,
    pub title: String,
}

/// Element yielded by forum topic search listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumTopic {
    pub id: u64,
    pub title: String,
    pub created_at: Option<String>,
    pub created_by: Option<ForumAuthor>,
    pub number_of_posts: Option<u32>,
    pub last_post_created_at: Option<String>,
    pub last_post_created_by: Option<ForumAuthor>,
    pub is_locked: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumAuthor {
    pub id: u64,
    pub name: Option<String>,
}

/// A forum topic with its posts and optional poll.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumTopicDetail {
    pub title: String,
    pub posts: Vec<ForumPost>,
    pub poll: Option<ForumPoll>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumPost {
    pub id: u64,
    pub number: Option<u32>,
    pub created_at: Option<String>,
    pub created_by: Option<ForumPostAuthor>,
    pub body: Option<String>,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumPostAuthor {
    pub id: u64,
    pub name: Option<String>,
    // The API spells it this way.
    pub forum_avator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumPoll {
    pub id: u64,
    pub question: Option<String>,
    pub closed: Option<bool>,
    pub options: Option<Vec<ForumPollOption>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumPollOption {
    pub id: u64,
    pub text: Option<String>,
    pub votes: Option<u32>,
}

impl PageEntity for ForumTopic {
    type Wire = Self;

    fn from_wire(wire: Self::Wire) -> Self {
        wire
    }
}

/// Sort order for forum topic searches. `recent` is the only order the API
/// currently documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumSort {
    Recent,
}

impl ForumSort {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Recent => "recent",
        }
    }
}
