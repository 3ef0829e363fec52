//! Declarative endpoint descriptors.
//!
//! # Design
//! An endpoint is data: a verb, a path relative to the API base, a response
//! shape, and a request struct that knows how to turn its typed fields into
//! a `Params` set. `ApiClient::call` interprets any `Endpoint` the same way,
//! so adding an operation means adding a struct and an `impl`, not a new
//! dispatch routine.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::http::FileUpload;
use crate::params::Params;
use crate::response::ResponseShape;

/// How a request is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Read-only; parameters go in the query string.
    Get,
    /// Mutating; parameters go in a form body.
    Post,
    /// Mutating with a file; parameters and the file go in a multipart body.
    PostFile,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::PostFile => "POST (multipart)",
        }
    }
}

/// Static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub verb: Verb,
    /// Path relative to the API base. May contain a `{slug}` placeholder,
    /// which the request struct fills in through `Endpoint::path`.
    pub path: &'static str,
}

/// A typed request for one remote operation.
pub trait Endpoint {
    type Shape: ResponseShape;

    const SPEC: EndpointSpec;

    /// Build the parameter set for this call.
    fn params(&self) -> Params;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::SPEC.path)
    }

    fn upload(&self) -> Option<FileUpload> {
        None
    }
}

/// The mapped result type of an endpoint.
pub type Output<E> = <<E as Endpoint>::Shape as ResponseShape>::Output;

/// Identifies a list, by numeric id or by slug plus owner.
///
/// Both forms may be set at once; the remote API decides which wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRef {
    pub list_id: Option<u64>,
    pub slug: Option<String>,
    pub owner_id: Option<u64>,
    pub owner_screen_name: Option<String>,
}

impl ListRef {
    pub fn id(list_id: u64) -> Self {
        Self {
            list_id: Some(list_id),
            ..Self::default()
        }
    }

    /// A slug owned by the user with `owner_screen_name`.
    pub fn slug(slug: impl Into<String>, owner_screen_name: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            owner_screen_name: Some(owner_screen_name.into()),
            ..Self::default()
        }
    }

    /// A slug owned by the user with `owner_id`.
    pub fn slug_with_owner_id(slug: impl Into<String>, owner_id: u64) -> Self {
        Self {
            slug: Some(slug.into()),
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub(crate) fn write(&self, params: &mut Params) {
        params.insert_id("list_id", self.list_id);
        params.insert_text("slug", self.slug.as_deref());
        params.insert_id("owner_id", self.owner_id);
        params.insert_text("owner_screen_name", self.owner_screen_name.as_deref());
    }
}

/// Identifies a user, by numeric id or screen name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRef {
    pub user_id: Option<u64>,
    pub screen_name: Option<String>,
}

impl UserRef {
    pub fn id(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            screen_name: None,
        }
    }

    pub fn screen_name(screen_name: impl Into<String>) -> Self {
        Self {
            user_id: None,
            screen_name: Some(screen_name.into()),
        }
    }

    pub(crate) fn write(&self, params: &mut Params) {
        params.insert_id("user_id", self.user_id);
        params.insert_text("screen_name", self.screen_name.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ref_by_id_writes_only_id() {
        let mut params = Params::new();
        ListRef::id(42).write(&mut params);
        assert_eq!(params.get("list_id"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn list_ref_by_slug_writes_owner() {
        let mut params = Params::new();
        ListRef::slug("team", "chirpdev").write(&mut params);
        assert_eq!(params.get("slug"), Some("team"));
        assert_eq!(params.get("owner_screen_name"), Some("chirpdev"));
        assert!(!params.contains_key("list_id"));
        assert!(!params.contains_key("owner_id"));
    }

    #[test]
    fn list_ref_sends_both_forms_when_both_set() {
        let list = ListRef {
            list_id: Some(9),
            slug: Some("team".to_string()),
            owner_id: Some(1),
            owner_screen_name: None,
        };
        let mut params = Params::new();
        list.write(&mut params);
        assert_eq!(params.get("list_id"), Some("9"));
        assert_eq!(params.get("slug"), Some("team"));
        assert_eq!(params.get("owner_id"), Some("1"));
    }

    #[test]
    fn user_ref_skips_zero_and_blank() {
        let user = UserRef {
            user_id: Some(0),
            screen_name: Some(" ".to_string()),
        };
        let mut params = Params::new();
        user.write(&mut params);
        assert!(params.is_empty());
    }

    #[test]
    fn list_ref_deserializes_from_partial_json() {
        let list: ListRef = serde_json::from_str(r#"{"slug":"team"}"#).unwrap();
        assert_eq!(list.slug.as_deref(), Some("team"));
        assert!(list.list_id.is_none());
    }
}
