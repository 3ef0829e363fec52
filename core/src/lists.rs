//! List endpoints: ownership, membership, subscription and timelines.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::endpoint::{Endpoint, EndpointSpec, ListRef, UserRef, Verb};
use crate::error::ApiError;
use crate::params::Params;
use crate::response::{Collection, Cursored, Entity, Success};
use crate::session::Session;
use crate::types::{CursoredPage, Tweet, TwitterList, User};

/// First-page cursor for cursored collections.
pub const FIRST_PAGE: i64 = -1;

/// Upper bound the API accepts for bulk member changes, per id kind.
pub const MAX_BULK_MEMBERS: usize = 100;

/// Visibility of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    #[default]
    Public,
    Private,
}

impl ListMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ListMode::Public => "public",
            ListMode::Private => "private",
        }
    }
}

fn first_page() -> i64 {
    FIRST_PAGE
}

fn yes() -> bool {
    true
}

fn default_timeline_count() -> u32 {
    200
}

fn default_page_count() -> u32 {
    20
}

// ---------------------------------------------------------------------------
// Lists a user owns, subscribes to or belongs to
// ---------------------------------------------------------------------------

/// All lists the user subscribes to, including their own.
/// With no user given, the authenticating user is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetLists {
    #[serde(flatten)]
    pub user: UserRef,
    /// Return owned lists first.
    pub reverse: bool,
}

impl GetLists {
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            reverse: false,
        }
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

impl Endpoint for GetLists {
    type Shape = Collection<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_lists",
        verb: Verb::Get,
        path: "lists/list.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert_flag("reverse", self.reverse);
        self.user.write(&mut params);
        params
    }
}

/// Lists the user has been added to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListMemberships {
    #[serde(flatten)]
    pub user: UserRef,
    pub cursor: i64,
}

impl Default for GetListMemberships {
    fn default() -> Self {
        Self {
            user: UserRef::default(),
            cursor: FIRST_PAGE,
        }
    }
}

impl GetListMemberships {
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Endpoint for GetListMemberships {
    type Shape = Cursored<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_memberships",
        verb: Verb::Get,
        path: "lists/memberships.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("cursor", self.cursor.to_string());
        self.user.write(&mut params);
        params
    }
}

/// Lists the user subscribes to (not including their own).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListSubscriptions {
    #[serde(flatten)]
    pub user: UserRef,
    pub count: u32,
    pub cursor: i64,
}

impl Default for GetListSubscriptions {
    fn default() -> Self {
        Self {
            user: UserRef::default(),
            count: default_page_count(),
            cursor: FIRST_PAGE,
        }
    }
}

impl GetListSubscriptions {
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Endpoint for GetListSubscriptions {
    type Shape = Cursored<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_subscriptions",
        verb: Verb::Get,
        path: "lists/subscriptions.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("count", self.count.to_string());
        params.insert("cursor", self.cursor.to_string());
        self.user.write(&mut params);
        params
    }
}

/// Lists the user owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListOwnerships {
    #[serde(flatten)]
    pub user: UserRef,
    pub count: u32,
    pub cursor: i64,
}

impl Default for GetListOwnerships {
    fn default() -> Self {
        Self {
            user: UserRef::default(),
            count: default_page_count(),
            cursor: FIRST_PAGE,
        }
    }
}

impl GetListOwnerships {
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Endpoint for GetListOwnerships {
    type Shape = Cursored<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_ownerships",
        verb: Verb::Get,
        path: "lists/ownerships.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("count", self.count.to_string());
        params.insert("cursor", self.cursor.to_string());
        self.user.write(&mut params);
        params
    }
}

// ---------------------------------------------------------------------------
// A single list
// ---------------------------------------------------------------------------

/// Tweets authored by the members of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListTimeline {
    #[serde(flatten)]
    pub list: ListRef,
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    #[serde(default = "default_timeline_count")]
    pub count: u32,
    #[serde(default = "yes")]
    pub include_rts: bool,
}

impl Default for GetListTimeline {
    fn default() -> Self {
        Self {
            list: ListRef::default(),
            since_id: None,
            max_id: None,
            count: default_timeline_count(),
            include_rts: true,
        }
    }
}

impl GetListTimeline {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    pub fn max_id(mut self, max_id: u64) -> Self {
        self.max_id = Some(max_id);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn include_rts(mut self, include_rts: bool) -> Self {
        self.include_rts = include_rts;
        self
    }
}

impl Endpoint for GetListTimeline {
    type Shape = Collection<Tweet>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_timeline",
        verb: Verb::Get,
        path: "lists/statuses.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert("count", self.count.to_string());
        params.insert_flag("include_rts", self.include_rts);
        params.insert_id("since_id", self.since_id);
        params.insert_id("max_id", self.max_id);
        params
    }
}

/// A single list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowList {
    #[serde(flatten)]
    pub list: ListRef,
}

impl ShowList {
    pub fn new(list: ListRef) -> Self {
        Self { list }
    }
}

impl Endpoint for ShowList {
    type Shape = Entity<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "show_list",
        verb: Verb::Get,
        path: "lists/show.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params
    }
}

/// Create a list owned by the authenticating user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateList {
    pub name: String,
    #[serde(default)]
    pub mode: ListMode,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateList {
    pub fn new(name: impl Into<String>, mode: ListMode) -> Self {
        Self {
            name: name.into(),
            mode,
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Endpoint for CreateList {
    type Shape = Entity<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "create_list",
        verb: Verb::Post,
        path: "lists/create.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("name", self.name.as_str());
        params.insert("mode", self.mode.as_str());
        params.insert_text("description", self.description.as_deref());
        params
    }
}

/// Change the name, mode or description of a list. Unset fields are left
/// as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateList {
    #[serde(flatten)]
    pub list: ListRef,
    pub name: Option<String>,
    pub mode: Option<ListMode>,
    pub description: Option<String>,
}

impl UpdateList {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mode(mut self, mode: ListMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Endpoint for UpdateList {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "update_list",
        verb: Verb::Post,
        path: "lists/update.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert_text("name", self.name.as_deref());
        if let Some(mode) = self.mode {
            params.insert("mode", mode.as_str());
        }
        params.insert_text("description", self.description.as_deref());
        params
    }
}

/// Delete a list owned by the authenticating user. Returns the deleted list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteList {
    #[serde(flatten)]
    pub list: ListRef,
}

impl DeleteList {
    pub fn new(list: ListRef) -> Self {
        Self { list }
    }
}

impl Endpoint for DeleteList {
    type Shape = Entity<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "delete_list",
        verb: Verb::Post,
        path: "lists/destroy.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// Members of a list, one page at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListMembers {
    #[serde(flatten)]
    pub list: ListRef,
    pub count: Option<u32>,
    #[serde(default = "first_page")]
    pub cursor: i64,
    pub include_entities: bool,
    #[serde(default = "yes")]
    pub skip_status: bool,
}

impl Default for GetListMembers {
    fn default() -> Self {
        Self {
            list: ListRef::default(),
            count: None,
            cursor: FIRST_PAGE,
            include_entities: false,
            skip_status: true,
        }
    }
}

impl GetListMembers {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Endpoint for GetListMembers {
    type Shape = Cursored<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_members",
        verb: Verb::Get,
        path: "lists/members.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert("cursor", self.cursor.to_string());
        if let Some(count) = self.count.filter(|c| *c > 0) {
            params.insert("count", count.to_string());
        }
        params.insert_flag("include_entities", self.include_entities);
        params.insert_flag("skip_status", self.skip_status);
        params
    }
}

/// Check whether a user is a member of a list. Resolves to the user when
/// they are, and to `ApiError::NotFound` when not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowListMember {
    #[serde(flatten)]
    pub list: ListRef,
    #[serde(flatten)]
    pub user: UserRef,
    pub include_entities: bool,
    #[serde(default = "yes")]
    pub skip_status: bool,
}

impl Default for ShowListMember {
    fn default() -> Self {
        Self {
            list: ListRef::default(),
            user: UserRef::default(),
            include_entities: false,
            skip_status: true,
        }
    }
}

impl ShowListMember {
    pub fn new(list: ListRef, user: UserRef) -> Self {
        Self {
            list,
            user,
            ..Self::default()
        }
    }
}

impl Endpoint for ShowListMember {
    type Shape = Entity<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "show_list_member",
        verb: Verb::Get,
        path: "lists/members/show.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        self.user.write(&mut params);
        params.insert_flag("include_entities", self.include_entities);
        params.insert_flag("skip_status", self.skip_status);
        params
    }
}

/// Add one user to a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddListMember {
    #[serde(flatten)]
    pub list: ListRef,
    #[serde(flatten)]
    pub member: UserRef,
}

impl AddListMember {
    pub fn new(list: ListRef, member: UserRef) -> Self {
        Self { list, member }
    }
}

impl Endpoint for AddListMember {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "add_list_member",
        verb: Verb::Post,
        path: "lists/members/create.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        self.member.write(&mut params);
        params
    }
}

/// Remove one user from a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveListMember {
    #[serde(flatten)]
    pub list: ListRef,
    #[serde(flatten)]
    pub member: UserRef,
}

impl RemoveListMember {
    pub fn new(list: ListRef, member: UserRef) -> Self {
        Self { list, member }
    }
}

impl Endpoint for RemoveListMember {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "remove_list_member",
        verb: Verb::Post,
        path: "lists/members/destroy.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        self.member.write(&mut params);
        params
    }
}

/// Add up to `MAX_BULK_MEMBERS` ids and screen names to a list in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddListMembers {
    #[serde(flatten)]
    pub list: ListRef,
    pub user_ids: Vec<u64>,
    pub screen_names: Vec<String>,
}

impl AddListMembers {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn user_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.user_ids.extend(ids);
        self
    }

    pub fn screen_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.screen_names.extend(names.into_iter().map(Into::into));
        self
    }
}

impl Endpoint for AddListMembers {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "add_list_members",
        verb: Verb::Post,
        path: "lists/members/create_all.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert_joined("user_id", &self.user_ids);
        params.insert_joined("screen_name", &self.screen_names);
        params
    }
}

/// Remove up to `MAX_BULK_MEMBERS` ids and screen names from a list in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveListMembers {
    #[serde(flatten)]
    pub list: ListRef,
    pub user_ids: Vec<u64>,
    pub screen_names: Vec<String>,
}

impl RemoveListMembers {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn user_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.user_ids.extend(ids);
        self
    }

    pub fn screen_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.screen_names.extend(names.into_iter().map(Into::into));
        self
    }
}

impl Endpoint for RemoveListMembers {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "remove_list_members",
        verb: Verb::Post,
        path: "lists/members/destroy_all.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert_joined("user_id", &self.user_ids);
        params.insert_joined("screen_name", &self.screen_names);
        params
    }
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

/// Subscribers of a list, one page at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetListSubscribers {
    #[serde(flatten)]
    pub list: ListRef,
    #[serde(default = "first_page")]
    pub cursor: i64,
    pub include_entities: bool,
    pub skip_status: bool,
}

impl Default for GetListSubscribers {
    fn default() -> Self {
        Self {
            list: ListRef::default(),
            cursor: FIRST_PAGE,
            include_entities: false,
            skip_status: false,
        }
    }
}

impl GetListSubscribers {
    pub fn new(list: ListRef) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Endpoint for GetListSubscribers {
    type Shape = Cursored<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_list_subscribers",
        verb: Verb::Get,
        path: "lists/subscribers.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params.insert("cursor", self.cursor.to_string());
        params.insert_flag("include_entities", self.include_entities);
        params.insert_flag("skip_status", self.skip_status);
        params
    }
}

/// Check whether a user subscribes to a list. Resolves to the user when
/// they do, and to `ApiError::NotFound` when not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowListSubscriber {
    #[serde(flatten)]
    pub list: ListRef,
    #[serde(flatten)]
    pub user: UserRef,
}

impl ShowListSubscriber {
    pub fn new(list: ListRef, user: UserRef) -> Self {
        Self { list, user }
    }
}

impl Endpoint for ShowListSubscriber {
    type Shape = Entity<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "show_list_subscriber",
        verb: Verb::Get,
        path: "lists/subscribers/show.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        self.user.write(&mut params);
        params
    }
}

/// Subscribe the authenticating user to a list. Returns the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeToList {
    #[serde(flatten)]
    pub list: ListRef,
}

impl SubscribeToList {
    pub fn new(list: ListRef) -> Self {
        Self { list }
    }
}

impl Endpoint for SubscribeToList {
    type Shape = Entity<TwitterList>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "subscribe_to_list",
        verb: Verb::Post,
        path: "lists/subscribers/create.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params
    }
}

/// Unsubscribe the authenticating user from a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeFromList {
    #[serde(flatten)]
    pub list: ListRef,
}

impl UnsubscribeFromList {
    pub fn new(list: ListRef) -> Self {
        Self { list }
    }
}

impl Endpoint for UnsubscribeFromList {
    type Shape = Success;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "unsubscribe_from_list",
        verb: Verb::Post,
        path: "lists/subscribers/destroy.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.list.write(&mut params);
        params
    }
}

/// Every list endpoint, in table form.
pub const LIST_ENDPOINTS: &[EndpointSpec] = &[
    GetLists::SPEC,
    GetListMemberships::SPEC,
    GetListSubscriptions::SPEC,
    GetListOwnerships::SPEC,
    GetListTimeline::SPEC,
    ShowList::SPEC,
    CreateList::SPEC,
    UpdateList::SPEC,
    DeleteList::SPEC,
    GetListMembers::SPEC,
    ShowListMember::SPEC,
    AddListMember::SPEC,
    RemoveListMember::SPEC,
    AddListMembers::SPEC,
    RemoveListMembers::SPEC,
    GetListSubscribers::SPEC,
    ShowListSubscriber::SPEC,
    SubscribeToList::SPEC,
    UnsubscribeFromList::SPEC,
];

/// Named shorthands for the list endpoints.
impl<S: Session> ApiClient<S> {
    pub async fn get_lists(&self, request: &GetLists) -> Result<Vec<TwitterList>, ApiError> {
        self.call(request).await
    }

    pub async fn get_list_timeline(&self, request: &GetListTimeline) -> Result<Vec<Tweet>, ApiError> {
        self.call(request).await
    }

    pub async fn get_list_memberships(
        &self,
        request: &GetListMemberships,
    ) -> Result<CursoredPage<TwitterList>, ApiError> {
        self.call(request).await
    }

    pub async fn get_list_subscriptions(
        &self,
        request: &GetListSubscriptions,
    ) -> Result<CursoredPage<TwitterList>, ApiError> {
        self.call(request).await
    }

    pub async fn get_list_ownerships(
        &self,
        request: &GetListOwnerships,
    ) -> Result<CursoredPage<TwitterList>, ApiError> {
        self.call(request).await
    }

    pub async fn show_list(&self, list: ListRef) -> Result<TwitterList, ApiError> {
        self.call(&ShowList::new(list)).await
    }

    pub async fn create_list(&self, request: &CreateList) -> Result<TwitterList, ApiError> {
        self.call(request).await
    }

    pub async fn update_list(&self, request: &UpdateList) -> bool {
        self.perform(request).await
    }

    pub async fn delete_list(&self, list: ListRef) -> Result<TwitterList, ApiError> {
        self.call(&DeleteList::new(list)).await
    }

    pub async fn get_list_members(
        &self,
        request: &GetListMembers,
    ) -> Result<CursoredPage<User>, ApiError> {
        self.call(request).await
    }

    pub async fn show_list_member(&self, list: ListRef, user: UserRef) -> Result<User, ApiError> {
        self.call(&ShowListMember::new(list, user)).await
    }

    pub async fn add_list_member(&self, list: ListRef, member: UserRef) -> bool {
        self.perform(&AddListMember::new(list, member)).await
    }

    pub async fn remove_list_member(&self, list: ListRef, member: UserRef) -> bool {
        self.perform(&RemoveListMember::new(list, member)).await
    }

    pub async fn add_list_members(&self, request: &AddListMembers) -> bool {
        self.perform(request).await
    }

    pub async fn remove_list_members(&self, request: &RemoveListMembers) -> bool {
        self.perform(request).await
    }

    pub async fn get_list_subscribers(
        &self,
        request: &GetListSubscribers,
    ) -> Result<CursoredPage<User>, ApiError> {
        self.call(request).await
    }

    pub async fn show_list_subscriber(&self, list: ListRef, user: UserRef) -> Result<User, ApiError> {
        self.call(&ShowListSubscriber::new(list, user)).await
    }

    pub async fn subscribe_to_list(&self, list: ListRef) -> Result<TwitterList, ApiError> {
        self.call(&SubscribeToList::new(list)).await
    }

    pub async fn unsubscribe_from_list(&self, list: ListRef) -> bool {
        self.perform(&UnsubscribeFromList::new(list)).await
    }
}
