//! Typed async client for the lists, users and suggested-users endpoints of
//! the 1.1 social REST API.
//!
//! # Overview
//! Every remote operation is a request struct implementing [`Endpoint`]. The
//! struct turns its typed, optional fields into a [`Params`] set; the
//! endpoint's [`EndpointSpec`] names the verb and path; its response shape
//! maps the raw reply. [`ApiClient::call`] interprets any endpoint the same
//! way: build parameters, resolve the path, issue one request through the
//! [`Session`], map the response.
//!
//! ```no_run
//! # async fn demo() -> Result<(), chirp_core::ApiError> {
//! use chirp_core::{ApiClient, ClientConfig, CreateList, ListMode};
//!
//! let client = ApiClient::connect(ClientConfig::from_env()?);
//! let list = client.call(&CreateList::new("tech", ListMode::Public)).await?;
//! println!("created {} ({})", list.full_name, list.id);
//! # Ok(()) }
//! ```
//!
//! # Design
//! - `ApiClient` holds only a session and a config; calls share no state.
//! - `prepare` and `parse` are pure, so request building and response
//!   mapping are testable without a network.
//! - Failures are an [`ApiError`] that separates transport, remote-status and
//!   mapping failures. Boolean-outcome endpoints can also be issued through
//!   [`ApiClient::perform`], which collapses the result to a flag.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod lists;
pub mod params;
pub mod response;
pub mod session;
pub mod types;
pub mod users;

pub use client::{ApiClient, PreparedCall};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EndpointSpec, ListRef, Output, UserRef, Verb};
pub use error::{ApiError, RemoteError};
pub use http::{FileUpload, HttpMethod, HttpRequest, HttpResponse};
pub use lists::{
    AddListMember, AddListMembers, CreateList, DeleteList, GetListMembers, GetListMemberships,
    GetListOwnerships, GetListSubscribers, GetListSubscriptions, GetListTimeline, GetLists,
    ListMode, RemoveListMember, RemoveListMembers, ShowList, ShowListMember, ShowListSubscriber,
    SubscribeToList, UnsubscribeFromList, UpdateList,
};
pub use params::Params;
pub use response::{Collection, Cursored, Entity, ResponseShape, Success};
pub use session::{Session, UreqSession};
pub use types::{
    CursoredPage, Entities, SuggestedCategory, SuggestedUsers, Tweet, TwitterList, User,
};
pub use users::{
    GetSuggestedCategories, GetSuggestedMembers, GetSuggestedUsers, LookupUsers, ShowUser,
    UpdateProfileImage,
};
