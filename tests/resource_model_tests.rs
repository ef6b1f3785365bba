//! Integration tests for resources and their connections.
//!
//! Tests cover:
//! - Partial resources embedded in responses and upgrading them with `load`
//! - Field access on partial versus full resources
//! - Connections, advertised or derived from the key
//! - Actions forwarded from a resource

mod common;

use common::{authorized_client, client, page, user_body, user_item, MockTransport, TOKEN};
use mixcloud_api::clients::HttpMethod;
use mixcloud_api::{FieldAccess, MixcloudError, Pagination, Value};
use serde_json::json;

fn cloudcast_body() -> serde_json::Value {
    json!({
        "key": "/bob/party-time/",
        "type": "cloudcast",
        "name": "Party Time",
        "created_time": "2020-06-01T18:21:01Z",
        "play_count": 1200,
        "user": {"key": "/bob/", "type": "user", "username": "bob"},
        "tags": [
            {"key": "/discover/house/", "type": "tag", "name": "House"},
            {"key": "/discover/disco/", "type": "tag", "name": "Disco"}
        ],
        "pictures": {"small": "https://thumbnailer.mixcloud.com/small.jpg"}
    })
}

#[tokio::test]
async fn test_embedded_resources_are_partial() {
    let mock = MockTransport::new();
    mock.get("/bob/party-time/", cloudcast_body());

    let cloudcast = client(&mock).get("bob/party-time").await.unwrap();
    let user = cloudcast.resource_field("user").unwrap();

    assert!(cloudcast.is_full());
    assert!(!user.is_full());
    assert_eq!(user.key(), "/bob/");

    match user.field("city") {
        Err(MixcloudError::NoSuchField { field, partial }) => {
            assert_eq!(field, "city");
            assert!(partial);
        }
        other => panic!("expected NoSuchField, got {other:?}"),
    }
}

#[tokio::test]
async fn test_nested_values_are_typed() {
    let mock = MockTransport::new();
    mock.get("/bob/party-time/", cloudcast_body());

    let cloudcast = client(&mock).get("bob/party-time").await.unwrap();

    assert!(matches!(cloudcast.get("created_time"), Some(Value::DateTime(_))));
    assert!(matches!(cloudcast.get("pictures"), Some(Value::Dict(_))));

    let tags = cloudcast.list_field("tags").unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags.by_key("discover/disco").unwrap()["name"], "Disco");

    assert!(matches!(
        cloudcast.str_field("play_count"),
        Err(MixcloudError::WrongType { .. })
    ));
}

#[tokio::test]
async fn test_load_upgrades_partial_resource() {
    let mock = MockTransport::new();
    mock.get("/bob/party-time/", cloudcast_body());
    mock.get("/bob/", user_body("bob"));
    let mixcloud = client(&mock);

    let cloudcast = mixcloud.get("bob/party-time").await.unwrap();
    let mut user = cloudcast.resource_field("user").unwrap().clone();

    user.load().await.unwrap();

    assert!(user.is_full());
    assert_eq!(user.key(), "/bob/");
    assert_eq!(user.str_field("city").unwrap(), "Athens");
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn test_load_if_partial_is_idempotent() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("alice")], None));
    mock.get("/alice/", user_body("alice"));
    let mixcloud = client(&mock);

    let list = mixcloud.popular(&Pagination::new()).await.unwrap();
    let mut alice = list[0].clone();

    alice.load_if_partial().await.unwrap();
    alice.load_if_partial().await.unwrap();

    assert!(alice.is_full());
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn test_load_twice_refetches_same_state() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("alice")], None));
    mock.get("/alice/", user_body("alice"));
    let mixcloud = client(&mock);

    let list = mixcloud.popular(&Pagination::new()).await.unwrap();
    let mut alice = list[0].clone();

    alice.load().await.unwrap();
    let first = alice.clone();
    alice.load().await.unwrap();

    assert_eq!(alice, first);
    assert!(alice.is_full());
    assert_eq!(alice.key(), "/alice/");
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_load_without_key_sends_nothing() {
    let mock = MockTransport::new();
    mock.get(
        "/popular/",
        page(vec![json!({"type": "user", "name": "nokey"})], None),
    );

    let list = client(&mock).popular(&Pagination::new()).await.unwrap();
    let mut keyless = list[0].clone();

    assert!(matches!(
        keyless.load().await,
        Err(MixcloudError::BadArgument { .. })
    ));
    assert!(!keyless.is_full());
    assert_eq!(keyless.kind(), "user");
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_load_missing_resource_is_not_found() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("ghost")], None));

    let list = client(&mock).popular(&Pagination::new()).await.unwrap();
    let mut ghost = list[0].clone();

    assert!(matches!(
        ghost.load().await,
        Err(MixcloudError::NotFound { .. })
    ));
    assert!(!ghost.is_full());
}

#[tokio::test]
async fn test_advertised_connections_are_followed() {
    let mock = MockTransport::new();
    mock.get("/bob/", user_body("bob"));
    mock.get(
        "/bob/followers/",
        page(vec![user_item("x"), user_item("y")], None),
    );
    let mixcloud = client(&mock);

    let bob = mixcloud.get("bob").await.unwrap();
    let mut names = bob.connection_names();
    names.sort_unstable();
    assert_eq!(names, vec!["cloudcasts", "followers"]);
    assert_eq!(
        bob.connection_url("followers"),
        "https://api.mixcloud.com/bob/followers/"
    );

    let followers = bob.followers(&Pagination::new().limit(2)).await.unwrap();
    assert_eq!(followers.len(), 2);
    assert_eq!(
        mock.last_request().query_value("limit").as_deref(),
        Some("2")
    );
}

#[tokio::test]
async fn test_unadvertised_connection_derives_from_key() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("alice")], None));
    mock.get("/alice/playlists/", page(vec![], None));
    let mixcloud = client(&mock);

    let list = mixcloud.popular(&Pagination::new()).await.unwrap();
    let alice = &list[0];

    assert_eq!(alice.connection_url("playlists"), "alice/playlists/");
    let playlists = alice.playlists(&Pagination::new()).await.unwrap();
    assert!(playlists.is_empty());

    assert!(matches!(
        alice.connection("nonsense", &Pagination::new()).await,
        Err(MixcloudError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_resource_actions_use_resource_key() {
    let mock = MockTransport::new();
    mock.get("/bob/party-time/", cloudcast_body());
    mock.on(HttpMethod::Post, "/bob/party-time/favorite/", json!({}));
    mock.on(HttpMethod::Delete, "/bob/party-time/repost/", json!({}));
    let mixcloud = authorized_client(&mock);

    let cloudcast = mixcloud.get("bob/party-time").await.unwrap();
    cloudcast.favorite().await.unwrap();
    cloudcast.unrepost().await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[1].http_method, HttpMethod::Post);
    assert_eq!(requests[2].http_method, HttpMethod::Delete);
    assert_eq!(requests[2].query_value("access_token").as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_resources_compare_by_content() {
    let mock = MockTransport::new();
    mock.get("/bob/", user_body("bob"));
    let mixcloud = client(&mock);

    let first = mixcloud.get("bob").await.unwrap();
    let second = mixcloud.get("/bob/").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.data().to_json(), user_body("bob"));
}
