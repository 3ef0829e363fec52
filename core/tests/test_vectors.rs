//! Verify request building and response mapping against the JSON vectors in
//! `test-vectors/`.
//!
//! Each case names an endpoint, gives its input as JSON, and lists the exact
//! verb, path and wire parameters the client must produce. Cases with a
//! simulated response also check the mapped result (as a subset of the
//! serialized output) or the error variant.

use std::collections::BTreeMap;
use std::fmt::Debug;

use chirp_core::{
    AddListMember, AddListMembers, ApiClient, ApiError, ClientConfig, CreateList, DeleteList,
    Endpoint, GetListMembers, GetListMemberships, GetListOwnerships, GetListSubscribers,
    GetListSubscriptions, GetListTimeline, GetLists, GetSuggestedCategories, GetSuggestedMembers,
    GetSuggestedUsers, HttpResponse, LookupUsers, Output, RemoveListMember, RemoveListMembers,
    ShowList, ShowListMember, ShowListSubscriber, ShowUser, SubscribeToList, UnsubscribeFromList,
    UpdateList, UpdateProfileImage, UreqSession,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/1.1/";

fn client() -> ApiClient<UreqSession> {
    ApiClient::connect(ClientConfig::with_base_url(BASE_URL).unwrap())
}

/// Every key in `expected` must be present in `actual` with a matching value.
/// Arrays must have the same length and match element-wise.
fn assert_subset(actual: &Value, expected: &Value, context: &str) {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => {
            for (key, want) in expected {
                let got = actual
                    .get(key)
                    .unwrap_or_else(|| panic!("{context}: missing field `{key}`"));
                assert_subset(got, want, &format!("{context}.{key}"));
            }
        }
        (Value::Array(actual), Value::Array(expected)) => {
            assert_eq!(actual.len(), expected.len(), "{context}: length");
            for (i, (got, want)) in actual.iter().zip(expected).enumerate() {
                assert_subset(got, want, &format!("{context}[{i}]"));
            }
        }
        _ => assert_eq!(actual, expected, "{context}"),
    }
}

fn check_case<E>(client: &ApiClient<UreqSession>, case: &Value)
where
    E: Endpoint + DeserializeOwned,
    Output<E>: Serialize + Debug,
{
    let name = case["name"].as_str().unwrap();
    let input: E = serde_json::from_value(case["input"].clone()).unwrap();
    let expected_req = &case["expected_request"];

    // Verify build
    let call = client.prepare(&input).unwrap();
    assert_eq!(call.endpoint, E::SPEC.name, "{name}: endpoint");
    assert_eq!(call.verb.as_str(), expected_req["verb"].as_str().unwrap(), "{name}: verb");
    assert_eq!(
        call.url,
        format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
        "{name}: url"
    );

    let params: BTreeMap<String, String> = call
        .params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let expected_params: BTreeMap<String, String> =
        serde_json::from_value(expected_req["params"].clone()).unwrap();
    assert_eq!(params, expected_params, "{name}: params");

    match expected_req.get("file_field") {
        Some(field) => {
            let upload = call.upload.as_ref().expect("upload");
            assert_eq!(upload.field, field.as_str().unwrap(), "{name}: file field");
        }
        None => assert!(call.upload.is_none(), "{name}: unexpected upload"),
    }

    // Verify parse
    let Some(sim) = case.get("simulated_response") else {
        return;
    };
    let response = HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    );
    let result = client.parse::<E>(response);

    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        let matched = match expected_error.as_str().unwrap() {
            "NotFound" => matches!(err, ApiError::NotFound),
            "Remote" => matches!(err, ApiError::Remote { .. }),
            "Http" => matches!(err, ApiError::Http { .. }),
            "Deserialization" => matches!(err, ApiError::Deserialization(_)),
            other => panic!("{name}: unknown expected_error: {other}"),
        };
        assert!(matched, "{name}: expected {expected_error}, got {err:?}");
    } else {
        let output = result.unwrap();
        let actual = serde_json::to_value(&output).unwrap();
        assert_subset(&actual, &case["expected_result"], name);
    }
}

fn run_vectors(raw: &str) -> usize {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let c = client();
    let cases = vectors["cases"].as_array().unwrap();
    for case in cases {
        match case["endpoint"].as_str().unwrap() {
            "get_lists" => check_case::<GetLists>(&c, case),
            "get_list_timeline" => check_case::<GetListTimeline>(&c, case),
            "get_list_memberships" => check_case::<GetListMemberships>(&c, case),
            "get_list_subscriptions" => check_case::<GetListSubscriptions>(&c, case),
            "get_list_ownerships" => check_case::<GetListOwnerships>(&c, case),
            "show_list" => check_case::<ShowList>(&c, case),
            "create_list" => check_case::<CreateList>(&c, case),
            "update_list" => check_case::<UpdateList>(&c, case),
            "delete_list" => check_case::<DeleteList>(&c, case),
            "get_list_members" => check_case::<GetListMembers>(&c, case),
            "show_list_member" => check_case::<ShowListMember>(&c, case),
            "add_list_member" => check_case::<AddListMember>(&c, case),
            "remove_list_member" => check_case::<RemoveListMember>(&c, case),
            "add_list_members" => check_case::<AddListMembers>(&c, case),
            "remove_list_members" => check_case::<RemoveListMembers>(&c, case),
            "get_list_subscribers" => check_case::<GetListSubscribers>(&c, case),
            "show_list_subscriber" => check_case::<ShowListSubscriber>(&c, case),
            "subscribe_to_list" => check_case::<SubscribeToList>(&c, case),
            "unsubscribe_from_list" => check_case::<UnsubscribeFromList>(&c, case),
            "get_suggested_categories" => check_case::<GetSuggestedCategories>(&c, case),
            "get_suggested_users" => check_case::<GetSuggestedUsers>(&c, case),
            "get_suggested_members" => check_case::<GetSuggestedMembers>(&c, case),
            "show_user" => check_case::<ShowUser>(&c, case),
            "lookup_users" => check_case::<LookupUsers>(&c, case),
            "update_profile_image" => check_case::<UpdateProfileImage>(&c, case),
            other => panic!("unknown endpoint in vectors: {other}"),
        }
    }
    cases.len()
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let count = run_vectors(include_str!("../../test-vectors/lists.json"));
    assert!(count >= 19, "every list endpoint should have a vector");
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn user_test_vectors() {
    let count = run_vectors(include_str!("../../test-vectors/users.json"));
    assert!(count >= 6, "every user endpoint should have a vector");
}
