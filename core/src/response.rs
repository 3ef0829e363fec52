//! Response shapes: how a raw `HttpResponse` becomes a typed result.
//!
//! Each endpoint names one shape. The shape decides the output type and the
//! decoding rule, so endpoints never parse bodies themselves.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{ApiError, RemoteError};
use crate::http::HttpResponse;
use crate::types::{CursoredPage, TwitterList, User};

/// Maps a response into the output of an endpoint.
pub trait ResponseShape {
    type Output;

    fn map(response: HttpResponse) -> Result<Self::Output, ApiError>;
}

/// Mutations whose payload is not interesting. Any 2xx maps to `true`.
#[derive(Debug)]
pub struct Success;

/// A single JSON object.
#[derive(Debug)]
pub struct Entity<T>(PhantomData<T>);

/// A JSON array, source order preserved.
#[derive(Debug)]
pub struct Collection<T>(PhantomData<T>);

/// An object holding an items array plus `next_cursor` / `previous_cursor`.
#[derive(Debug)]
pub struct Cursored<T>(PhantomData<T>);

/// Names the key a cursored response stores its items under.
pub trait CursorItems {
    const ITEMS_KEY: &'static str;
}

impl CursorItems for TwitterList {
    const ITEMS_KEY: &'static str = "lists";
}

impl CursorItems for User {
    const ITEMS_KEY: &'static str = "users";
}

impl ResponseShape for Success {
    type Output = bool;

    fn map(response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response)?;
        Ok(true)
    }
}

impl<T: DeserializeOwned> ResponseShape for Entity<T> {
    type Output = T;

    fn map(response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }
}

impl<T: DeserializeOwned> ResponseShape for Collection<T> {
    type Output = Vec<T>;

    fn map(response: HttpResponse) -> Result<Vec<T>, ApiError> {
        check_status(&response)?;
        let items: Vec<T> = decode(&response.body)?;
        trace!(count = items.len(), "mapped collection");
        Ok(items)
    }
}

impl<T: DeserializeOwned + CursorItems> ResponseShape for Cursored<T> {
    type Output = CursoredPage<T>;

    fn map(response: HttpResponse) -> Result<CursoredPage<T>, ApiError> {
        check_status(&response)?;
        let mut object: Map<String, Value> = decode(&response.body)?;
        let items = object.remove(T::ITEMS_KEY).ok_or_else(|| {
            ApiError::Deserialization(format!("missing `{}` array", T::ITEMS_KEY))
        })?;
        let items: Vec<T> =
            serde_json::from_value(items).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let page = CursoredPage {
            items,
            next_cursor: cursor_field(&object, "next_cursor")?,
            previous_cursor: cursor_field(&object, "previous_cursor")?,
        };
        trace!(
            count = page.items.len(),
            next = page.next_cursor,
            previous = page.previous_cursor,
            "mapped cursored page"
        );
        Ok(page)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Read a cursor from its numeric field, falling back to the `*_str` form.
/// An absent cursor reads as `0`.
fn cursor_field(object: &Map<String, Value>, key: &str) -> Result<i64, ApiError> {
    if let Some(value) = object.get(key) {
        return value
            .as_i64()
            .ok_or_else(|| ApiError::Deserialization(format!("`{key}` is not an integer")));
    }
    match object.get(&format!("{key}_str")) {
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| ApiError::Deserialization(format!("`{key}_str` is not an integer"))),
        Some(_) => Err(ApiError::Deserialization(format!("`{key}_str` is not a string"))),
        None => Ok(0),
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    errors: Vec<RemoteError>,
}

/// Pass 2xx through. 404 is `NotFound`; any other status is `Remote` when the
/// body carries an `errors` envelope and `Http` with the raw body otherwise.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) if !envelope.errors.is_empty() => Err(ApiError::Remote {
            status: response.status,
            errors: envelope.errors,
        }),
        _ => Err(ApiError::Http {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
