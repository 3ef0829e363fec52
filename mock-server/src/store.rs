//! In-memory state behind the fake API: users, lists, tweets and suggestion
//! categories, plus the JSON shapes the routes render them as.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The user every request is treated as coming from.
pub const AUTH_USER_ID: u64 = 1;

const CREATED_AT: &str = "Mon Oct 19 09:30:00 +0000 2026";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserJson {
    pub id: u64,
    pub id_str: String,
    pub name: String,
    pub screen_name: String,
    pub description: String,
    pub followers_count: u64,
    pub friends_count: u64,
    pub statuses_count: u64,
    pub profile_image_url_https: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListJson {
    pub id: u64,
    pub id_str: String,
    pub name: String,
    pub slug: String,
    pub full_name: String,
    pub description: String,
    pub mode: String,
    pub uri: String,
    pub member_count: u64,
    pub subscriber_count: u64,
    pub following: bool,
    pub created_at: String,
    pub user: UserJson,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TweetJson {
    pub id: u64,
    pub id_str: String,
    pub text: String,
    pub created_at: String,
    pub retweeted: bool,
    pub user: UserJson,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryJson {
    pub name: String,
    pub slug: String,
    pub size: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestedUsersJson {
    pub name: String,
    pub slug: String,
    pub size: u64,
    pub users: Vec<UserJson>,
}

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: u64,
    pub screen_name: String,
    pub name: String,
    pub profile_image: String,
}

#[derive(Clone, Debug)]
pub struct ListRecord {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub mode: String,
    pub owner_id: u64,
    /// Insertion order is the order members are listed in.
    pub members: Vec<u64>,
    pub subscribers: BTreeSet<u64>,
}

#[derive(Clone, Debug)]
pub struct TweetRecord {
    pub id: u64,
    pub user_id: u64,
    pub text: String,
    pub retweet: bool,
}

#[derive(Clone, Debug)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub user_ids: Vec<u64>,
}

#[derive(Debug)]
pub struct Store {
    pub users: BTreeMap<u64, UserRecord>,
    pub lists: BTreeMap<u64, ListRecord>,
    pub tweets: Vec<TweetRecord>,
    pub categories: Vec<Category>,
    next_list_id: u64,
}

impl Store {
    /// A store with four users, a handful of tweets and two suggestion
    /// categories. No lists exist until a client creates one, except
    /// `@alice/reading`, which lets subscription routes be exercised.
    pub fn seeded() -> Self {
        let users = [
            (1, "chirpdev", "Chirp Dev"),
            (2, "alice", "Alice"),
            (3, "bob", "Bob"),
            (4, "carol", "Carol"),
        ]
        .into_iter()
        .map(|(id, screen_name, name)| {
            (
                id,
                UserRecord {
                    id,
                    screen_name: screen_name.to_string(),
                    name: name.to_string(),
                    profile_image: format!("https://pbs.example.com/profile_images/{screen_name}.png"),
                },
            )
        })
        .collect();

        let tweets = [
            (101, 2, "reading about borrow checkers", false),
            (102, 3, "RT @alice: reading about borrow checkers", true),
            (103, 4, "new album is out", false),
            (104, 2, "lists are underrated", false),
            (105, 3, "shipping on a friday", false),
        ]
        .into_iter()
        .map(|(id, user_id, text, retweet)| TweetRecord {
            id,
            user_id,
            text: text.to_string(),
            retweet,
        })
        .collect();

        let categories = vec![
            Category {
                name: "Technology".to_string(),
                slug: "technology".to_string(),
                user_ids: vec![2, 3],
            },
            Category {
                name: "Music".to_string(),
                slug: "music".to_string(),
                user_ids: vec![4],
            },
        ];

        let mut store = Self {
            users,
            lists: BTreeMap::new(),
            tweets,
            categories,
            next_list_id: 1000,
        };
        let reading = store.create_list(2, "reading", "public", "Good reads");
        if let Some(list) = store.lists.get_mut(&reading) {
            list.members = vec![3, 4];
        }
        store
    }

    pub fn create_list(&mut self, owner_id: u64, name: &str, mode: &str, description: &str) -> u64 {
        let id = self.next_list_id;
        self.next_list_id += 1;
        self.lists.insert(
            id,
            ListRecord {
                id,
                name: name.to_string(),
                slug: slugify(name),
                description: description.to_string(),
                mode: mode.to_string(),
                owner_id,
                members: Vec::new(),
                subscribers: BTreeSet::new(),
            },
        );
        id
    }

    pub fn user_by_screen_name(&self, screen_name: &str) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|u| u.screen_name.eq_ignore_ascii_case(screen_name))
    }

    pub fn list_by_slug(&self, owner_id: u64, slug: &str) -> Option<&ListRecord> {
        self.lists
            .values()
            .find(|l| l.owner_id == owner_id && l.slug == slug)
    }

    pub fn user_json(&self, user: &UserRecord) -> UserJson {
        let statuses_count = self.tweets.iter().filter(|t| t.user_id == user.id).count() as u64;
        UserJson {
            id: user.id,
            id_str: user.id.to_string(),
            name: user.name.clone(),
            screen_name: user.screen_name.clone(),
            description: String::new(),
            followers_count: 0,
            friends_count: 0,
            statuses_count,
            profile_image_url_https: user.profile_image.clone(),
            created_at: CREATED_AT.to_string(),
        }
    }

    pub fn list_json(&self, list: &ListRecord) -> Option<ListJson> {
        let owner = self.users.get(&list.owner_id)?;
        Some(ListJson {
            id: list.id,
            id_str: list.id.to_string(),
            name: list.name.clone(),
            slug: list.slug.clone(),
            full_name: format!("@{}/{}", owner.screen_name, list.slug),
            description: list.description.clone(),
            mode: list.mode.clone(),
            uri: format!("/{}/lists/{}", owner.screen_name, list.slug),
            member_count: list.members.len() as u64,
            subscriber_count: list.subscribers.len() as u64,
            following: list.subscribers.contains(&AUTH_USER_ID),
            created_at: CREATED_AT.to_string(),
            user: self.user_json(owner),
        })
    }

    pub fn tweet_json(&self, tweet: &TweetRecord) -> Option<TweetJson> {
        let user = self.users.get(&tweet.user_id)?;
        Some(TweetJson {
            id: tweet.id,
            id_str: tweet.id.to_string(),
            text: tweet.text.clone(),
            created_at: CREATED_AT.to_string(),
            retweeted: tweet.retweet,
            user: self.user_json(user),
        })
    }

    pub fn users_json(&self, ids: &[u64]) -> Vec<UserJson> {
        ids.iter()
            .filter_map(|id| self.users.get(id))
            .map(|u| self.user_json(u))
            .collect()
    }
}

/// Lower-case the name and replace runs of anything non-alphanumeric with `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// One page of `items` for a cursored response.
///
/// `-1` (or any non-positive cursor above `-1`) starts at the beginning. A
/// positive cursor is the offset of the page, and a cursor below `-1` walks
/// backwards from offset `-cursor`.
pub fn page<T: Clone>(items: &[T], cursor: i64, count: usize) -> (Vec<T>, i64, i64) {
    let len = items.len();
    let count = count.max(1);
    let offset = |n: u64| usize::try_from(n).unwrap_or(usize::MAX);
    let start = if cursor > 0 {
        offset(cursor.unsigned_abs()).min(len)
    } else if cursor < -1 {
        offset(cursor.unsigned_abs()).saturating_sub(count).min(len)
    } else {
        0
    };
    let end = start.saturating_add(count).min(len);
    let next = if end < len { end as i64 } else { 0 };
    let previous = if start > 0 { -(start as i64) } else { 0 };
    (items[start..end].to_vec(), next, previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Rust  Folks!"), "rust-folks");
        assert_eq!(slugify("  tech "), "tech");
        assert_eq!(slugify("a/b/c"), "a-b-c");
    }

    #[test]
    fn paging_walks_forward_and_back() {
        let items: Vec<u32> = (1..=5).collect();

        let (first, next, previous) = page(&items, -1, 2);
        assert_eq!(first, [1, 2]);
        assert_eq!((next, previous), (2, 0));

        let (second, next, previous) = page(&items, next, 2);
        assert_eq!(second, [3, 4]);
        assert_eq!((next, previous), (4, -2));

        let (last, next, _) = page(&items, next, 2);
        assert_eq!(last, [5]);
        assert_eq!(next, 0);

        let (back, _, _) = page(&items, previous, 2);
        assert_eq!(back, [1, 2]);
    }

    #[test]
    fn paging_clamps_out_of_range_cursors() {
        let items = [1, 2, 3];

        let (before, next, previous) = page(&items, -100, 20);
        assert!(before.is_empty());
        assert_eq!((next, previous), (0, -3));

        let (past, next, _) = page(&items, 50, 2);
        assert!(past.is_empty());
        assert_eq!(next, 0);

        let (all, next, previous) = page(&items, 1, usize::MAX);
        assert_eq!(all, [2, 3]);
        assert_eq!((next, previous), (0, -1));

        let (extreme, _, _) = page(&items, i64::MIN, usize::MAX);
        assert_eq!(extreme, [1, 2, 3]);
    }

    #[test]
    fn seeded_store_has_reading_list() {
        let store = Store::seeded();
        let list = store.list_by_slug(2, "reading").unwrap();
        assert_eq!(list.members, [3, 4]);
        let json = store.list_json(list).unwrap();
        assert_eq!(json.full_name, "@alice/reading");
        assert_eq!(json.member_count, 2);
    }
}
