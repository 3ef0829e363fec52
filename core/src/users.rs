//! User lookup, suggested users and profile image upload.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::endpoint::{Endpoint, EndpointSpec, UserRef, Verb};
use crate::error::ApiError;
use crate::http::FileUpload;
use crate::params::Params;
use crate::response::{Collection, Entity};
use crate::session::Session;
use crate::types::{SuggestedCategory, SuggestedUsers, User};

fn yes() -> bool {
    true
}

fn suggestion_path(slug: &str, suffix: &str) -> Cow<'static, str> {
    Cow::Owned(format!(
        "users/suggestions/{}{suffix}",
        urlencoding::encode(slug)
    ))
}

/// Categories of suggested users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSuggestedCategories {
    /// Restrict to categories available in this language, e.g. `en`.
    pub lang: Option<String>,
}

impl Endpoint for GetSuggestedCategories {
    type Shape = Collection<SuggestedCategory>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_suggested_categories",
        verb: Verb::Get,
        path: "users/suggestions.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert_text("lang", self.lang.as_deref());
        params
    }
}

/// Users in one suggestion category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSuggestedUsers {
    pub slug: String,
    #[serde(default)]
    pub lang: Option<String>,
}

impl GetSuggestedUsers {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            lang: None,
        }
    }
}

impl Endpoint for GetSuggestedUsers {
    type Shape = Entity<SuggestedUsers>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_suggested_users",
        verb: Verb::Get,
        path: "users/suggestions/{slug}.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert_text("lang", self.lang.as_deref());
        params
    }

    fn path(&self) -> Cow<'static, str> {
        suggestion_path(&self.slug, ".json")
    }
}

/// Users in one suggestion category, with their most recent status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSuggestedMembers {
    pub slug: String,
}

impl GetSuggestedMembers {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

impl Endpoint for GetSuggestedMembers {
    type Shape = Collection<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "get_suggested_members",
        verb: Verb::Get,
        path: "users/suggestions/{slug}/members.json",
    };

    fn params(&self) -> Params {
        Params::new()
    }

    fn path(&self) -> Cow<'static, str> {
        suggestion_path(&self.slug, "/members.json")
    }
}

/// A single user by id or screen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowUser {
    #[serde(flatten)]
    pub user: UserRef,
    #[serde(default = "yes")]
    pub include_entities: bool,
}

impl Default for ShowUser {
    fn default() -> Self {
        Self {
            user: UserRef::default(),
            include_entities: true,
        }
    }
}

impl ShowUser {
    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }
}

impl Endpoint for ShowUser {
    type Shape = Entity<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "show_user",
        verb: Verb::Get,
        path: "users/show.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.user.write(&mut params);
        params.insert_flag("include_entities", self.include_entities);
        params
    }
}

/// Up to 100 users per kind of identifier in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupUsers {
    pub user_ids: Vec<u64>,
    pub screen_names: Vec<String>,
    #[serde(default = "yes")]
    pub include_entities: bool,
}

impl Default for LookupUsers {
    fn default() -> Self {
        Self {
            user_ids: Vec::new(),
            screen_names: Vec::new(),
            include_entities: true,
        }
    }
}

impl LookupUsers {
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

impl Endpoint for LookupUsers {
    type Shape = Collection<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "lookup_users",
        verb: Verb::Get,
        path: "users/lookup.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert_joined("user_id", &self.user_ids);
        params.insert_joined("screen_name", &self.screen_names);
        params.insert_flag("include_entities", self.include_entities);
        params
    }
}

/// Replace the authenticating user's profile image. Returns the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileImage {
    pub file_name: String,
    pub image: Vec<u8>,
    #[serde(default)]
    pub include_entities: bool,
    #[serde(default = "yes")]
    pub skip_status: bool,
}

impl UpdateProfileImage {
    pub const FILE_FIELD: &'static str = "image";

    pub fn new(file_name: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            image,
            include_entities: false,
            skip_status: true,
        }
    }
}

impl Endpoint for UpdateProfileImage {
    type Shape = Entity<User>;

    const SPEC: EndpointSpec = EndpointSpec {
        name: "update_profile_image",
        verb: Verb::PostFile,
        path: "account/update_profile_image.json",
    };

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert_flag("include_entities", self.include_entities);
        params.insert_flag("skip_status", self.skip_status);
        params
    }

    fn upload(&self) -> Option<FileUpload> {
        Some(FileUpload {
            file_name: self.file_name.clone(),
            contents: self.image.clone(),
            field: Self::FILE_FIELD.to_string(),
        })
    }
}

/// Every user endpoint, in table form.
pub const USER_ENDPOINTS: &[EndpointSpec] = &[
    GetSuggestedCategories::SPEC,
    GetSuggestedUsers::SPEC,
    GetSuggestedMembers::SPEC,
    ShowUser::SPEC,
    LookupUsers::SPEC,
    UpdateProfileImage::SPEC,
];

/// Named shorthands for the user endpoints.
impl<S: Session> ApiClient<S> {
    pub async fn get_suggested_categories(
        &self,
        lang: Option<&str>,
    ) -> Result<Vec<SuggestedCategory>, ApiError> {
        let request = GetSuggestedCategories {
            lang: lang.map(str::to_string),
        };
        self.call(&request).await
    }

    pub async fn get_suggested_users(&self, request: &GetSuggestedUsers) -> Result<SuggestedUsers, ApiError> {
        self.call(request).await
    }

    pub async fn get_suggested_members(&self, slug: &str) -> Result<Vec<User>, ApiError> {
        self.call(&GetSuggestedMembers::new(slug)).await
    }

    pub async fn show_user(&self, user: UserRef) -> Result<User, ApiError> {
        self.call(&ShowUser::new(user)).await
    }

    pub async fn lookup_users(&self, request: &LookupUsers) -> Result<Vec<User>, ApiError> {
        self.call(request).await
    }

    pub async fn update_profile_image(&self, request: &UpdateProfileImage) -> Result<User, ApiError> {
        self.call(request).await
    }
}
