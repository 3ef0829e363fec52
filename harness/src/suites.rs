//! Numbered steps, grouped into suites.
//!
//! A step that returns `Err` aborts the rest of its suite; a boolean-outcome
//! step that reports `false` marks the suite failed and the run continues.
//! The list suite deletes its scratch list on either path.

use chirp_core::{
    AddListMembers, ApiClient, ApiError, CreateList, GetListMembers, GetListOwnerships,
    GetListTimeline, GetLists, GetSuggestedUsers, ListMode, ListRef, RemoveListMembers, Session,
    TwitterList, UpdateList, UserRef,
};

/// Which steps to run, and the account the list suite works with.
#[derive(Debug, Clone)]
pub struct Plan {
    steps: Vec<u32>,
    screen_name: String,
}

impl Plan {
    pub fn new(steps: Vec<u32>, screen_name: String) -> Self {
        Self { steps, screen_name }
    }

    fn wants(&self, step: u32) -> bool {
        self.steps.is_empty() || self.steps.contains(&step)
    }
}

fn heading(suite: u32, step: u32, name: &str) {
    println!("{suite}.{step} {name}");
}

fn check(ok: bool, what: &str) -> bool {
    if !ok {
        println!("    FAILED: {what}");
    }
    ok
}

/// Create a scratch list, exercise it, and delete it again.
pub async fn lists<S: Session>(client: &ApiClient<S>, plan: &Plan) -> bool {
    match run_lists(client, plan).await {
        Ok(passed) => passed,
        Err(e) => {
            println!("    ERROR: {e}");
            tracing::error!(error = %e, "list suite aborted");
            false
        }
    }
}

async fn run_lists<S: Session>(client: &ApiClient<S>, plan: &Plan) -> Result<bool, ApiError> {
    if plan.wants(1) {
        heading(8, 1, "Lists\\GetLists");
        for list in client.get_lists(&GetLists::default()).await? {
            println!("    {} ({} members)", list.full_name, list.member_count);
        }
    }

    // Every later step works on the scratch list, so it is always created.
    heading(8, 2, "Lists\\CreateList");
    let created = client
        .create_list(&CreateList::new("live fire", ListMode::Private).description("scratch list"))
        .await?;
    println!("    created {} (id {})", created.full_name, created.id);

    let outcome = exercise_list(client, plan, &created).await;

    // The scratch list goes even when a step above aborted the suite.
    heading(8, 11, "Lists\\DeleteList");
    match client.delete_list(ListRef::id(created.id)).await {
        Ok(deleted) => println!("    deleted {}", deleted.full_name),
        Err(e) if outcome.is_err() => {
            println!("    ERROR: scratch list {} left behind: {e}", created.id);
            tracing::warn!(list = created.id, error = %e, "scratch list left behind");
        }
        Err(e) => return Err(e),
    }

    outcome
}

/// Steps 3 to 10, all run against the scratch list.
async fn exercise_list<S: Session>(
    client: &ApiClient<S>,
    plan: &Plan,
    created: &TwitterList,
) -> Result<bool, ApiError> {
    let mut passed = true;
    let member = || UserRef::screen_name(plan.screen_name.clone());
    let scratch = || ListRef::id(created.id);

    if plan.wants(3) {
        heading(8, 3, "Lists\\ShowList");
        let list = client.show_list(scratch()).await?;
        println!("    {} // {} // {}", list.name, list.slug, list.mode);
    }

    if plan.wants(4) {
        heading(8, 4, "Lists\\AddListMembers");
        let added = client
            .add_list_members(&AddListMembers::new(scratch()).screen_names([plan.screen_name.as_str()]))
            .await;
        passed &= check(added, "members were not added");
    }

    if plan.wants(5) {
        heading(8, 5, "Lists\\GetListMembers");
        let mut request = GetListMembers::new(scratch()).count(20);
        loop {
            let page = client.get_list_members(&request).await?;
            for user in &page.items {
                println!("    UserID: {} // ScreenName: {}", user.id, user.screen_name);
            }
            if !page.has_next() {
                break;
            }
            request = request.cursor(page.next_cursor);
        }
    }

    if plan.wants(6) {
        heading(8, 6, "Lists\\ShowListMember");
        let user = client.show_list_member(scratch(), member()).await?;
        println!("    {} is a member", user.screen_name);
    }

    if plan.wants(7) {
        heading(8, 7, "Lists\\GetListTimeline");
        let tweets = client
            .get_list_timeline(&GetListTimeline::new(scratch()).count(10))
            .await?;
        for tweet in &tweets {
            let author = tweet.user.as_ref().map(|u| u.screen_name.as_str()).unwrap_or("?");
            println!("    {} @{}: {}", tweet.id, author, tweet.text);
        }
    }

    if plan.wants(8) {
        heading(8, 8, "Lists\\UpdateList");
        let updated = client
            .update_list(&UpdateList::new(scratch()).description("updated by live-fire"))
            .await;
        passed &= check(updated, "list was not updated");
    }

    if plan.wants(9) {
        heading(8, 9, "Lists\\GetListOwnerships");
        let owned = client
            .get_list_ownerships(&GetListOwnerships::default())
            .await?;
        let found = owned.items.iter().any(|l| l.id == created.id);
        passed &= check(found, "scratch list missing from ownerships");
    }

    if plan.wants(10) {
        heading(8, 10, "Lists\\RemoveListMembers");
        let removed = client
            .remove_list_members(
                &RemoveListMembers::new(scratch()).screen_names([plan.screen_name.as_str()]),
            )
            .await;
        passed &= check(removed, "members were not removed");
    }

    Ok(passed)
}

/// Walk the suggestion categories and the users in the last one.
pub async fn suggested<S: Session>(client: &ApiClient<S>, plan: &Plan) -> bool {
    match run_suggested(client, plan).await {
        Ok(passed) => passed,
        Err(e) => {
            println!("    ERROR: {e}");
            tracing::error!(error = %e, "suggested-users suite aborted");
            false
        }
    }
}

async fn run_suggested<S: Session>(client: &ApiClient<S>, plan: &Plan) -> Result<bool, ApiError> {
    let wants_users = plan.wants(2) || plan.wants(3);
    if !plan.wants(1) && !wants_users {
        return Ok(true);
    }

    // Steps 2 and 3 need a category, so the list is fetched even when step 1
    // itself was not selected.
    let categories = client.get_suggested_categories(None).await?;
    if plan.wants(1) {
        heading(9, 1, "SuggestedUsers\\GetSuggestedCategories");
        for category in &categories {
            println!("    Name: {} // Slug: {}", category.name, category.slug);
        }
    }
    if !wants_users {
        return Ok(true);
    }

    let Some(slug) = categories.last().map(|c| c.slug.clone()) else {
        println!("    FAILED: no suggestion category to query");
        return Ok(false);
    };

    if plan.wants(2) {
        heading(9, 2, "SuggestedUsers\\GetSuggestedUsers");
        let suggested = client
            .get_suggested_users(&GetSuggestedUsers::new(&slug))
            .await?;
        for user in &suggested.users {
            println!("    UserID: {} // ScreenName: {}", user.id, user.screen_name);
        }
    }

    if plan.wants(3) {
        heading(9, 3, "SuggestedUsers\\GetSuggestedMembers");
        for user in client.get_suggested_members(&slug).await? {
            println!("    UserID: {} // ScreenName: {}", user.id, user.screen_name);
        }
    }

    Ok(true)
}
