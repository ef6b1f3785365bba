//! Integration tests for the async API client.
//!
//! These tests drive [`Mixcloud`] against a mock transport and verify:
//! - Resource and list decoding by response shape
//! - Query construction (metadata, access token, pagination, search)
//! - Error mapping for failed responses
//! - Actions, embeds and upload editing

mod common;

use chrono::Datelike;
use common::{authorized_client, client, page, user_body, user_item, MockTransport, TOKEN};
use mixcloud_api::clients::{HttpMethod, HttpResponse, RequestBody};
use mixcloud_api::{
    Action, Decoded, Embed, EmbedOptions, FieldAccess, MixcloudError, Pagination, SearchType,
    UploadOptions,
};
use serde_json::json;

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_get_returns_full_resource() {
    let mock = MockTransport::new();
    mock.get("/bob/", user_body("bob"));
    let mixcloud = client(&mock);

    let user = mixcloud.get("bob").await.unwrap();

    assert_eq!(user.key(), "/bob/");
    assert_eq!(user.kind(), "user");
    assert!(user.is_full());
    assert_eq!(user["name"], "BOB");
    assert_eq!(user.str_field("city").unwrap(), "Athens");
    assert_eq!(user.i64_field("follower_count").unwrap(), 42);
    assert_eq!(user.datetime_field("created_time").unwrap().year(), 2013);
    assert_eq!(user.to_string(), "<Resource: User '/bob/'>");

    let request = mock.last_request();
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.query_value("metadata").as_deref(), Some("1"));
    assert_eq!(request.query_value("access_token"), None);
}

#[tokio::test]
async fn test_get_accepts_keys_in_any_form() {
    let mock = MockTransport::new();
    mock.get("/bob/party/", json!({"key": "/bob/party/", "type": "cloudcast"}));
    let mixcloud = client(&mock);

    for key in ["bob/party", "/bob/party/", "bob/party/"] {
        let cloudcast = mixcloud.get(key).await.unwrap();
        assert_eq!(cloudcast.key(), "/bob/party/");
    }
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_authorized_requests_carry_token() {
    let mock = MockTransport::new();
    mock.get("/bob/", user_body("bob"));

    authorized_client(&mock).get("bob").await.unwrap();

    assert_eq!(
        mock.last_request().query_value("access_token").as_deref(),
        Some(TOKEN)
    );
}

#[tokio::test]
async fn test_resource_without_key_uses_requested_key() {
    let mock = MockTransport::new();
    mock.get("/discover/house/", json!({"type": "tag", "name": "House"}));

    let tag = client(&mock)
        .discover("house")
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(tag.key(), "/discover/house/");
    assert_eq!(tag.kind(), "tag");
}

#[tokio::test]
async fn test_fetch_dispatches_on_shape() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("a"), user_item("b")], None));
    mock.get("/alice/", user_body("alice"));
    let mixcloud = client(&mock);

    match mixcloud.fetch("popular", &[]).await.unwrap() {
        Decoded::List(list) => {
            assert_eq!(list.len(), 2);
            assert!(!list[0].is_full());
        }
        Decoded::Resource(r) => panic!("expected a list, got {r}"),
    }

    assert!(matches!(
        mixcloud.fetch("alice", &[]).await.unwrap(),
        Decoded::Resource(_)
    ));
}

#[tokio::test]
async fn test_get_on_list_is_decode_error() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("a")], None));

    let result = client(&mock).get("popular").await;
    assert!(matches!(result, Err(MixcloudError::Decode { .. })));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mock = MockTransport::new();
    mock.respond(
        HttpMethod::Get,
        "/bob/",
        &[],
        HttpResponse::from_text(200, "text/html", "<html></html>"),
    );

    let result = client(&mock).get("bob").await;
    assert!(matches!(result, Err(MixcloudError::Decode { .. })));
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let mock = MockTransport::new();

    let result = client(&mock).get("nobody").await;

    match result {
        Err(MixcloudError::NotFound { key }) => assert_eq!(key, "nobody"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_with_ok_status_is_api_error() {
    let mock = MockTransport::new();
    mock.get(
        "/bob/",
        json!({"error": {"type": "RateLimitException", "message": "Slow down", "retry_after": 30}}),
    );

    let error = client(&mock).get("bob").await.unwrap_err();

    match &error {
        MixcloudError::Api {
            kind,
            message,
            extra,
        } => {
            assert_eq!(kind, "RateLimitException");
            assert_eq!(message, "Slow down");
            assert_eq!(extra["retry_after"], 30);
        }
        other => panic!("expected Api, got {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "RateLimitException: Slow down (retry_after: 30)"
    );
}

#[tokio::test]
async fn test_oauth_exception_is_unauthorized() {
    let mock = MockTransport::new();
    mock.respond(
        HttpMethod::Get,
        "/me/",
        &[],
        HttpResponse::from_json(
            400,
            &json!({"error": {"type": "OAuthException", "message": "Invalid token"}}),
        ),
    );

    let result = authorized_client(&mock).me().await;
    assert!(matches!(
        result,
        Err(MixcloudError::Unauthorized { message }) if message == "Invalid token"
    ));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let mock = MockTransport::new();
    mock.respond(
        HttpMethod::Get,
        "/bob/",
        &[],
        HttpResponse::from_text(502, "text/html", "Bad gateway"),
    );

    let result = client(&mock).get("bob").await;
    assert!(matches!(result, Err(MixcloudError::Http(_))));
}

#[tokio::test]
async fn test_me_without_token_sends_nothing() {
    let mock = MockTransport::new();

    let result = client(&mock).me().await;

    assert!(matches!(result, Err(MixcloudError::Unauthorized { .. })));
    assert_eq!(mock.request_count(), 0);
}

// ============================================================================
// Listings, search and pagination
// ============================================================================

#[tokio::test]
async fn test_listing_endpoints() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![user_item("a")], None));
    mock.get("/popular/hot/", page(vec![user_item("b")], None));
    mock.get("/new/", page(vec![user_item("c")], None));
    let mixcloud = client(&mock);
    let p = Pagination::new();

    assert_eq!(mixcloud.popular(&p).await.unwrap()[0].key(), "/a/");
    assert_eq!(mixcloud.hot(&p).await.unwrap()[0].key(), "/b/");
    assert_eq!(mixcloud.new_cloudcasts(&p).await.unwrap()[0].key(), "/c/");
}

#[tokio::test]
async fn test_search_sends_term_and_type() {
    let mock = MockTransport::new();
    mock.get_with(
        "/search/",
        &[("q", "deep house"), ("type", "user")],
        page(vec![user_item("dj")], None),
    );

    let results = client(&mock)
        .search("deep house", SearchType::User, &Pagination::new().limit(5))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let request = mock.last_request();
    assert_eq!(request.query_value("limit").as_deref(), Some("5"));
    assert_eq!(request.query_value("q").as_deref(), Some("deep house"));
}

#[tokio::test]
async fn test_search_defaults_to_cloudcasts() {
    let mock = MockTransport::new();
    mock.get_with("/search/", &[("type", "cloudcast")], page(vec![], None));

    client(&mock)
        .search("x", SearchType::default(), &Pagination::new())
        .await
        .unwrap();

    assert_eq!(
        mock.last_request().query_value("type").as_deref(),
        Some("cloudcast")
    );
}

#[tokio::test]
async fn test_invalid_search_type_sends_nothing() {
    let mock = MockTransport::new();

    let result = client(&mock)
        .search_str("x", "podcast", &Pagination::new())
        .await;

    assert!(matches!(result, Err(MixcloudError::BadArgument { .. })));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_conflicting_pagination_sends_nothing() {
    let mock = MockTransport::new();

    let result = client(&mock)
        .popular(&Pagination::new().offset(10).page(2))
        .await;

    assert!(matches!(result, Err(MixcloudError::BadArgument { .. })));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_page_is_sent_as_offset_and_limit() {
    let mock = MockTransport::new();
    mock.get("/popular/", page(vec![], None));

    client(&mock)
        .popular(&Pagination::new().page(3).per_page(10))
        .await
        .unwrap();

    let request = mock.last_request();
    assert_eq!(request.query_value("offset").as_deref(), Some("30"));
    assert_eq!(request.query_value("limit").as_deref(), Some("10"));
}

#[tokio::test]
async fn test_connection_by_key() {
    let mock = MockTransport::new();
    mock.get(
        "/bob/followers/",
        page(vec![user_item("x"), user_item("y")], None),
    );

    let followers = client(&mock)
        .connection("bob", "followers", &Pagination::new())
        .await
        .unwrap();

    assert_eq!(followers.len(), 2);
    assert_eq!(followers.by_key("y").unwrap().key(), "/y/");
}

// ============================================================================
// Actions and embeds
// ============================================================================

#[tokio::test]
async fn test_actions_use_post_and_delete() {
    let mock = MockTransport::new();
    mock.on(HttpMethod::Post, "/bob/follow/", json!({"result": {"success": true}}));
    mock.on(HttpMethod::Delete, "/bob/follow/", json!({"result": {"success": true}}));
    mock.on(HttpMethod::Post, "/bob/party/listen-later/", json!({}));
    let mixcloud = authorized_client(&mock);

    let result = mixcloud.follow("bob").await.unwrap();
    assert_eq!(result["result"]["success"], true);
    mixcloud.unfollow("/bob/").await.unwrap();
    mixcloud.act("bob/party", Action::ListenLater).await.unwrap();

    let methods: Vec<HttpMethod> = mock.requests().iter().map(|r| r.http_method).collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Post, HttpMethod::Delete, HttpMethod::Post]
    );
    for request in mock.requests() {
        assert_eq!(request.query_value("access_token").as_deref(), Some(TOKEN));
    }
}

#[tokio::test]
async fn test_action_without_token_sends_nothing() {
    let mock = MockTransport::new();

    let result = client(&mock).favorite("bob/party").await;

    assert!(matches!(result, Err(MixcloudError::Unauthorized { .. })));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_failed_action_is_error() {
    let mock = MockTransport::new();
    mock.respond(
        HttpMethod::Post,
        "/bob/party/repost/",
        &[],
        HttpResponse::from_json(
            403,
            &json!({"error": {"type": "OAuthException", "message": "Forbidden"}}),
        ),
    );

    let result = authorized_client(&mock).repost("bob/party").await;
    assert!(matches!(result, Err(MixcloudError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_embed_json_and_html() {
    let mock = MockTransport::new();
    mock.get(
        "/bob/party/embed-json/",
        json!({"html": "<iframe></iframe>", "width": 300}),
    );
    mock.respond(
        HttpMethod::Get,
        "/bob/party/embed-html/",
        &[],
        HttpResponse::from_text(200, "text/html", "<iframe></iframe>"),
    );
    let mixcloud = client(&mock);
    let options = EmbedOptions::new().width(300).color("ff0000");

    let json = mixcloud.embed_json("bob/party", &options).await.unwrap();
    assert_eq!(json["width"], 300_i64);
    let request = mock.last_request();
    assert_eq!(request.query_value("width").as_deref(), Some("300"));
    assert_eq!(request.query_value("color").as_deref(), Some("ff0000"));
    assert_eq!(request.query_value("metadata"), None);

    let html = mixcloud.embed_html("bob/party", &options).await.unwrap();
    assert_eq!(html, "<iframe></iframe>");
}

#[tokio::test]
async fn test_oembed_dispatches_on_content_type() {
    let mock = MockTransport::new();
    mock.get_with(
        "/oembed",
        &[("url", "https://www.mixcloud.com/bob/party/")],
        json!({"type": "rich", "html": "<iframe></iframe>"}),
    );
    mock.respond(
        HttpMethod::Get,
        "/oembed",
        &[("url", "https://www.mixcloud.com/bob/other/")],
        HttpResponse::from_text(200, "text/xml", "<oembed/>"),
    );
    let mixcloud = client(&mock);

    let json = mixcloud
        .oembed("bob/party", &EmbedOptions::new())
        .await
        .unwrap();
    assert!(matches!(json, Embed::Json(ref d) if d["type"] == "rich"));

    let xml = mixcloud
        .oembed("/bob/other/", &EmbedOptions::new())
        .await
        .unwrap();
    assert_eq!(xml.as_html(), Some("<oembed/>"));
}

// ============================================================================
// Editing uploads
// ============================================================================

#[tokio::test]
async fn test_edit_short_key_resolves_authorized_user() {
    let mock = MockTransport::new();
    mock.get("/me/", user_body("bob"));
    mock.on(
        HttpMethod::Post,
        "/upload/bob/friday-mix/edit/",
        json!({"result": {"success": true, "key": "/bob/friday-mix/"}}),
    );

    let options = UploadOptions::new().description("Updated").tag("house");
    let result = authorized_client(&mock)
        .edit("friday-mix", Some("Friday night mix"), &options)
        .await
        .unwrap();

    assert_eq!(result["result"]["key"], "/bob/friday-mix/");

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].http_method, HttpMethod::Get);
    let body = requests[1].body.as_ref().unwrap();
    assert!(matches!(body, RequestBody::Form(_)));
    assert_eq!(body.text_field("name"), Some("Friday night mix"));
    assert_eq!(body.text_field("description"), Some("Updated"));
    assert_eq!(body.text_field("tags-0-tag"), Some("house"));
}

#[tokio::test]
async fn test_edit_full_key_skips_me() {
    let mock = MockTransport::new();
    mock.on(HttpMethod::Post, "/upload/bob/mix/edit/", json!({}));

    authorized_client(&mock)
        .edit("/bob/mix/", None, &UploadOptions::new().unlisted(true))
        .await
        .unwrap();

    assert_eq!(mock.request_count(), 1);
    let body = mock.last_request().body.unwrap();
    assert_eq!(body.text_field("unlisted"), Some("1"));
    assert_eq!(body.text_field("name"), None);
}

#[tokio::test]
async fn test_edit_with_too_many_tags_sends_nothing() {
    let mock = MockTransport::new();
    let options = UploadOptions::new().tags(["a", "b", "c", "d", "e", "f"]);

    let result = authorized_client(&mock).edit("bob/mix", None, &options).await;

    assert!(matches!(result, Err(MixcloudError::BadArgument { .. })));
    assert_eq!(mock.request_count(), 0);
}
