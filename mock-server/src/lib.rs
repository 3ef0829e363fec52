//! In-memory fake of the 1.1 lists, users and suggestions API.
//!
//! Every request is treated as coming from `@chirpdev` (id 1). Routes accept
//! the same wire parameters as the real API and answer with the same JSON
//! shapes, including the `{"errors": [...]}` envelope on failure.

pub mod store;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

use store::{
    page, CategoryJson, ListJson, ListRecord, Store, SuggestedUsersJson, TweetJson, UserJson,
    AUTH_USER_ID,
};

pub type Db = Arc<RwLock<Store>>;

type Args = HashMap<String, String>;

const MAX_BULK: usize = 100;

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/1.1/lists/list.json", get(get_lists))
        .route("/1.1/lists/statuses.json", get(list_timeline))
        .route("/1.1/lists/memberships.json", get(list_memberships))
        .route("/1.1/lists/subscriptions.json", get(list_subscriptions))
        .route("/1.1/lists/ownerships.json", get(list_ownerships))
        .route("/1.1/lists/show.json", get(show_list))
        .route("/1.1/lists/create.json", post(create_list))
        .route("/1.1/lists/update.json", post(update_list))
        .route("/1.1/lists/destroy.json", post(destroy_list))
        .route("/1.1/lists/members.json", get(list_members))
        .route("/1.1/lists/members/show.json", get(show_member))
        .route("/1.1/lists/members/create.json", post(add_member))
        .route("/1.1/lists/members/destroy.json", post(remove_member))
        .route("/1.1/lists/members/create_all.json", post(add_members))
        .route("/1.1/lists/members/destroy_all.json", post(remove_members))
        .route("/1.1/lists/subscribers.json", get(list_subscribers))
        .route("/1.1/lists/subscribers/show.json", get(show_subscriber))
        .route("/1.1/lists/subscribers/create.json", post(subscribe))
        .route("/1.1/lists/subscribers/destroy.json", post(unsubscribe))
        .route("/1.1/users/suggestions.json", get(suggestion_categories))
        .route("/1.1/users/suggestions/{slug}", get(suggested_users))
        .route("/1.1/users/suggestions/{slug}/members.json", get(suggested_members))
        .route("/1.1/users/show.json", get(show_user))
        .route("/1.1/users/lookup.json", get(lookup_users))
        .route(
            "/1.1/account/update_profile_image.json",
            post(update_profile_image),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failure rendered as the API's error envelope.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: u32,
    message: String,
}

impl ApiFailure {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: 34,
            message: "Sorry, that page does not exist.".to_string(),
        }
    }

    fn missing(param: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: 38,
            message: format!("{param} parameter is missing."),
        }
    }

    fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: 110,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({ "errors": [{ "code": self.code, "message": self.message }] });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Parameter helpers
// ---------------------------------------------------------------------------

fn text<'a>(args: &'a Args, key: &str) -> Option<&'a str> {
    args.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn number<T: std::str::FromStr>(args: &Args, key: &str) -> Option<T> {
    text(args, key).and_then(|v| v.parse().ok())
}

fn flag(args: &Args, key: &str, default: bool) -> bool {
    match text(args, key) {
        Some(v) => matches!(v, "true" | "True" | "t" | "1"),
        None => default,
    }
}

/// The user named by `user_id` or `screen_name`, if either is present.
fn named_user(store: &Store, args: &Args) -> Result<Option<u64>, ApiFailure> {
    if let Some(id) = number::<u64>(args, "user_id").filter(|id| *id > 0) {
        return store
            .users
            .contains_key(&id)
            .then_some(Some(id))
            .ok_or_else(ApiFailure::not_found);
    }
    match text(args, "screen_name") {
        Some(name) => store
            .user_by_screen_name(name)
            .map(|u| Some(u.id))
            .ok_or_else(ApiFailure::not_found),
        None => Ok(None),
    }
}

fn user_or_self(store: &Store, args: &Args) -> Result<u64, ApiFailure> {
    Ok(named_user(store, args)?.unwrap_or(AUTH_USER_ID))
}

fn required_user(store: &Store, args: &Args) -> Result<u64, ApiFailure> {
    named_user(store, args)?.ok_or_else(|| ApiFailure::missing("user_id or screen_name"))
}

/// The list named by `list_id`, or by `slug` plus `owner_id` / `owner_screen_name`.
fn find_list(store: &Store, args: &Args) -> Result<u64, ApiFailure> {
    if let Some(id) = number::<u64>(args, "list_id").filter(|id| *id > 0) {
        return store
            .lists
            .contains_key(&id)
            .then_some(id)
            .ok_or_else(ApiFailure::not_found);
    }
    let slug = text(args, "slug").ok_or_else(|| ApiFailure::missing("list_id or slug"))?;
    let owner = match number::<u64>(args, "owner_id").filter(|id| *id > 0) {
        Some(id) => id,
        None => {
            let name = text(args, "owner_screen_name")
                .ok_or_else(|| ApiFailure::missing("owner_id or owner_screen_name"))?;
            store
                .user_by_screen_name(name)
                .map(|u| u.id)
                .ok_or_else(ApiFailure::not_found)?
        }
    };
    store
        .list_by_slug(owner, slug)
        .map(|l| l.id)
        .ok_or_else(ApiFailure::not_found)
}

fn owned_list<'a>(store: &'a mut Store, args: &Args) -> Result<&'a mut ListRecord, ApiFailure> {
    let id = find_list(store, args)?;
    let list = store.lists.get_mut(&id).ok_or_else(ApiFailure::not_found)?;
    if list.owner_id != AUTH_USER_ID {
        return Err(ApiFailure::forbidden("You aren't allowed to change this list."));
    }
    Ok(list)
}

fn render_list(store: &Store, id: u64) -> Result<Json<ListJson>, ApiFailure> {
    store
        .lists
        .get(&id)
        .and_then(|l| store.list_json(l))
        .map(Json)
        .ok_or_else(ApiFailure::not_found)
}

/// Ids named by comma-joined `user_id` and `screen_name` parameters.
/// Unknown users are skipped, like the real bulk endpoints do.
fn bulk_users(store: &Store, args: &Args) -> Result<Vec<u64>, ApiFailure> {
    let ids: Vec<&str> = text(args, "user_id").map(|v| v.split(',').collect()).unwrap_or_default();
    let names: Vec<&str> = text(args, "screen_name")
        .map(|v| v.split(',').collect())
        .unwrap_or_default();
    if ids.is_empty() && names.is_empty() {
        return Err(ApiFailure::missing("user_id or screen_name"));
    }
    if ids.len() > MAX_BULK || names.len() > MAX_BULK {
        return Err(ApiFailure::forbidden("Too many users in a single request."));
    }
    let mut found: Vec<u64> = ids
        .iter()
        .filter_map(|id| id.trim().parse::<u64>().ok())
        .filter(|id| store.users.contains_key(id))
        .collect();
    found.extend(
        names
            .iter()
            .filter_map(|name| store.user_by_screen_name(name.trim()))
            .map(|u| u.id),
    );
    Ok(found)
}

fn cursored_lists(store: &Store, ids: &[u64], args: &Args) -> Json<serde_json::Value> {
    let (ids, next, previous) = page(
        ids,
        number(args, "cursor").unwrap_or(-1),
        number(args, "count").unwrap_or(20),
    );
    let lists: Vec<ListJson> = ids
        .iter()
        .filter_map(|id| store.lists.get(id))
        .filter_map(|l| store.list_json(l))
        .collect();
    Json(json!({ "lists": lists, "next_cursor": next, "previous_cursor": previous }))
}

fn cursored_users(store: &Store, ids: &[u64], args: &Args) -> Json<serde_json::Value> {
    let (ids, next, previous) = page(
        ids,
        number(args, "cursor").unwrap_or(-1),
        number(args, "count").unwrap_or(20),
    );
    let users = store.users_json(&ids);
    Json(json!({
        "users": users,
        "next_cursor": next,
        "next_cursor_str": next.to_string(),
        "previous_cursor": previous,
        "previous_cursor_str": previous.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Lists a user owns, subscribes to or belongs to
// ---------------------------------------------------------------------------

async fn get_lists(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<Vec<ListJson>>, ApiFailure> {
    let store = db.read().await;
    let user = user_or_self(&store, &args)?;
    let owned = store.lists.values().filter(|l| l.owner_id == user);
    let subscribed = store.lists.values().filter(|l| l.subscribers.contains(&user));
    let ordered: Vec<&ListRecord> = if flag(&args, "reverse", false) {
        owned.chain(subscribed).collect()
    } else {
        subscribed.chain(owned).collect()
    };
    Ok(Json(
        ordered.into_iter().filter_map(|l| store.list_json(l)).collect(),
    ))
}

async fn list_memberships(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let store = db.read().await;
    let user = user_or_self(&store, &args)?;
    let ids: Vec<u64> = store
        .lists
        .values()
        .filter(|l| l.members.contains(&user))
        .map(|l| l.id)
        .collect();
    Ok(cursored_lists(&store, &ids, &args))
}

async fn list_subscriptions(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let store = db.read().await;
    let user = user_or_self(&store, &args)?;
    let ids: Vec<u64> = store
        .lists
        .values()
        .filter(|l| l.subscribers.contains(&user))
        .map(|l| l.id)
        .collect();
    Ok(cursored_lists(&store, &ids, &args))
}

async fn list_ownerships(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let store = db.read().await;
    let user = user_or_self(&store, &args)?;
    let ids: Vec<u64> = store
        .lists
        .values()
        .filter(|l| l.owner_id == user)
        .map(|l| l.id)
        .collect();
    Ok(cursored_lists(&store, &ids, &args))
}

// ---------------------------------------------------------------------------
// A single list
// ---------------------------------------------------------------------------

async fn list_timeline(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<Vec<TweetJson>>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    let list = store.lists.get(&id).ok_or_else(ApiFailure::not_found)?;
    let since_id = number::<u64>(&args, "since_id").unwrap_or(0);
    let max_id = number::<u64>(&args, "max_id").unwrap_or(u64::MAX);
    let count = number::<usize>(&args, "count").unwrap_or(20);
    let include_rts = flag(&args, "include_rts", true);

    let mut tweets: Vec<_> = store
        .tweets
        .iter()
        .filter(|t| list.members.contains(&t.user_id))
        .filter(|t| include_rts || !t.retweet)
        .filter(|t| t.id > since_id && t.id <= max_id)
        .collect();
    tweets.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(Json(
        tweets
            .into_iter()
            .take(count)
            .filter_map(|t| store.tweet_json(t))
            .collect(),
    ))
}

async fn show_list(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    render_list(&store, id)
}

async fn create_list(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let name = text(&args, "name").ok_or_else(|| ApiFailure::missing("name"))?;
    let mode = text(&args, "mode").unwrap_or("public");
    let description = text(&args, "description").unwrap_or_default();

    let mut store = db.write().await;
    let id = store.create_list(AUTH_USER_ID, name, mode, description);
    tracing::info!(id, list = name, "created list");
    render_list(&store, id)
}

async fn update_list(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let list = owned_list(&mut store, &args)?;
    if let Some(name) = text(&args, "name") {
        list.name = name.to_string();
    }
    if let Some(mode) = text(&args, "mode") {
        list.mode = mode.to_string();
    }
    if let Some(description) = text(&args, "description") {
        list.description = description.to_string();
    }
    let id = list.id;
    render_list(&store, id)
}

async fn destroy_list(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let id = owned_list(&mut store, &args)?.id;
    let rendered = render_list(&store, id)?;
    store.lists.remove(&id);
    tracing::info!(id, "deleted list");
    Ok(rendered)
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

async fn list_members(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    let members = store
        .lists
        .get(&id)
        .map(|l| l.members.clone())
        .unwrap_or_default();
    Ok(cursored_users(&store, &members, &args))
}

async fn show_member(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<UserJson>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    let user = required_user(&store, &args)?;
    let is_member = store.lists.get(&id).is_some_and(|l| l.members.contains(&user));
    if !is_member {
        return Err(ApiFailure::not_found());
    }
    store
        .users
        .get(&user)
        .map(|u| Json(store.user_json(u)))
        .ok_or_else(ApiFailure::not_found)
}

async fn add_member(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let user = required_user(&store, &args)?;
    let list = owned_list(&mut store, &args)?;
    if !list.members.contains(&user) {
        list.members.push(user);
    }
    let id = list.id;
    render_list(&store, id)
}

async fn remove_member(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let user = required_user(&store, &args)?;
    let list = owned_list(&mut store, &args)?;
    list.members.retain(|m| *m != user);
    let id = list.id;
    render_list(&store, id)
}

async fn add_members(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let users = bulk_users(&store, &args)?;
    let list = owned_list(&mut store, &args)?;
    for user in users {
        if !list.members.contains(&user) {
            list.members.push(user);
        }
    }
    let id = list.id;
    render_list(&store, id)
}

async fn remove_members(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let users = bulk_users(&store, &args)?;
    let list = owned_list(&mut store, &args)?;
    list.members.retain(|m| !users.contains(m));
    let id = list.id;
    render_list(&store, id)
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

async fn list_subscribers(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    let subscribers: Vec<u64> = store
        .lists
        .get(&id)
        .map(|l| l.subscribers.iter().copied().collect())
        .unwrap_or_default();
    Ok(cursored_users(&store, &subscribers, &args))
}

async fn show_subscriber(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<UserJson>, ApiFailure> {
    let store = db.read().await;
    let id = find_list(&store, &args)?;
    let user = required_user(&store, &args)?;
    let subscribed = store
        .lists
        .get(&id)
        .is_some_and(|l| l.subscribers.contains(&user));
    if !subscribed {
        return Err(ApiFailure::not_found());
    }
    store
        .users
        .get(&user)
        .map(|u| Json(store.user_json(u)))
        .ok_or_else(ApiFailure::not_found)
}

async fn subscribe(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let id = find_list(&store, &args)?;
    if let Some(list) = store.lists.get_mut(&id) {
        list.subscribers.insert(AUTH_USER_ID);
    }
    render_list(&store, id)
}

async fn unsubscribe(
    State(db): State<Db>,
    Form(args): Form<Args>,
) -> Result<Json<ListJson>, ApiFailure> {
    let mut store = db.write().await;
    let id = find_list(&store, &args)?;
    if let Some(list) = store.lists.get_mut(&id) {
        list.subscribers.remove(&AUTH_USER_ID);
    }
    render_list(&store, id)
}

// ---------------------------------------------------------------------------
// Users and suggestions
// ---------------------------------------------------------------------------

async fn suggestion_categories(State(db): State<Db>) -> Json<Vec<CategoryJson>> {
    let store = db.read().await;
    Json(
        store
            .categories
            .iter()
            .map(|c| CategoryJson {
                name: c.name.clone(),
                slug: c.slug.clone(),
                size: c.user_ids.len() as u64,
            })
            .collect(),
    )
}

async fn suggested_users(
    State(db): State<Db>,
    Path(slug): Path<String>,
) -> Result<Json<SuggestedUsersJson>, ApiFailure> {
    let store = db.read().await;
    let slug = slug.strip_suffix(".json").ok_or_else(ApiFailure::not_found)?;
    let category = store
        .categories
        .iter()
        .find(|c| c.slug == slug)
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(SuggestedUsersJson {
        name: category.name.clone(),
        slug: category.slug.clone(),
        size: category.user_ids.len() as u64,
        users: store.users_json(&category.user_ids),
    }))
}

async fn suggested_members(
    State(db): State<Db>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<UserJson>>, ApiFailure> {
    let store = db.read().await;
    let category = store
        .categories
        .iter()
        .find(|c| c.slug == slug)
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(store.users_json(&category.user_ids)))
}

async fn show_user(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<UserJson>, ApiFailure> {
    let store = db.read().await;
    let id = required_user(&store, &args)?;
    store
        .users
        .get(&id)
        .map(|u| Json(store.user_json(u)))
        .ok_or_else(ApiFailure::not_found)
}

async fn lookup_users(
    State(db): State<Db>,
    Query(args): Query<Args>,
) -> Result<Json<Vec<UserJson>>, ApiFailure> {
    let store = db.read().await;
    let ids = bulk_users(&store, &args)?;
    if ids.is_empty() {
        return Err(ApiFailure::not_found());
    }
    Ok(Json(store.users_json(&ids)))
}

async fn update_profile_image(
    State(db): State<Db>,
    mut multipart: Multipart,
) -> Result<Json<UserJson>, ApiFailure> {
    let mut file_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let name = field.file_name().unwrap_or("image").to_string();
            let bytes = field.bytes().await.map_err(|_| ApiFailure::missing("image"))?;
            if bytes.is_empty() {
                return Err(ApiFailure::missing("image"));
            }
            file_name = Some(name);
        }
    }
    let file_name = file_name.ok_or_else(|| ApiFailure::missing("image"))?;

    let mut store = db.write().await;
    let user = store
        .users
        .get_mut(&AUTH_USER_ID)
        .ok_or_else(ApiFailure::not_found)?;
    user.profile_image = format!("https://pbs.example.com/profile_images/{file_name}");
    let user = user.clone();
    Ok(Json(store.user_json(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> Args {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn find_list_by_slug_and_owner_name() {
        let store = Store::seeded();
        let id = find_list(&store, &args(&[("slug", "reading"), ("owner_screen_name", "alice")]))
            .unwrap();
        assert_eq!(store.lists[&id].name, "reading");
    }

    #[test]
    fn find_list_requires_owner_for_slug() {
        let store = Store::seeded();
        let err = find_list(&store, &args(&[("slug", "reading")])).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_values_count_as_absent() {
        let store = Store::seeded();
        assert_eq!(user_or_self(&store, &args(&[("screen_name", " ")])).unwrap(), AUTH_USER_ID);
    }

    #[test]
    fn bulk_users_skips_unknown() {
        let store = Store::seeded();
        let ids = bulk_users(&store, &args(&[("user_id", "2,99"), ("screen_name", "carol,nobody")]))
            .unwrap();
        assert_eq!(ids, [2, 4]);
    }

    #[test]
    fn bulk_users_rejects_oversized_requests() {
        let store = Store::seeded();
        let many = (1..=101).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        let err = bulk_users(&store, &args(&[("user_id", &many)])).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn flags_accept_both_spellings() {
        assert!(flag(&args(&[("x", "True")]), "x", false));
        assert!(flag(&args(&[("x", "true")]), "x", false));
        assert!(!flag(&args(&[("x", "false")]), "x", true));
        assert!(flag(&args(&[]), "x", true));
    }
}
