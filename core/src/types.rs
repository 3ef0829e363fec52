//! Response models for lists, users, tweets and suggestion categories.
//!
//! # Design
//! Plain value objects decoded from the API's JSON. Every field the API may
//! omit carries `#[serde(default)]`, and unknown fields are ignored, so a
//! new field on the server never turns into a mapping failure.

use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub following: Option<bool>,
}

/// A curated list of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterList {
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    /// `public` or `private`.
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub subscriber_count: u64,
    #[serde(default)]
    pub following: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    /// The owner.
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    pub text: String,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMention {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntity {
    pub id: u64,
    #[serde(default)]
    pub media_url_https: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub user_mentions: Vec<UserMention>,
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

/// A single status from a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    #[serde(default, alias = "full_text")]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub retweeted: bool,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(default)]
    pub entities: Option<Entities>,
}

impl Tweet {
    /// True when the tweet carries hashtags, media or links.
    pub fn has_entities(&self) -> bool {
        self.entities.as_ref().is_some_and(|e| {
            !e.hashtags.is_empty() || !e.media.is_empty() || !e.urls.is_empty()
        })
    }
}

/// One page of a cursored collection.
///
/// Pass `next_cursor` (or `previous_cursor`) back as the `cursor` of the same
/// request to move through the collection. A cursor of `0` means there is no
/// page in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CursoredPage<T> {
    pub items: Vec<T>,
    pub next_cursor: i64,
    pub previous_cursor: i64,
}

impl<T> CursoredPage<T> {
    pub fn has_next(&self) -> bool {
        self.next_cursor != 0
    }

    pub fn has_previous(&self) -> bool {
        self.previous_cursor != 0
    }
}

/// A suggested-user category, as listed by `users/suggestions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub size: u64,
}

/// A suggested-user category together with its users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedUsers {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub users: Vec<User>,
}
