use onesignal_client::{
    ApiError, Client, ClientConfig, CreateNotificationResponse, CsvExport, CsvExportResponse,
    Error, Notification, NotificationsQuery, PlayerList,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP_ID: &str = "5eb5a37e-b458-11e3-ac11-000c2940e62c";
const API_KEY: &str = "test-rest-key";

/// Runs `call` against a client pointed at `server`. The blocking client is
/// built, used and dropped off the async runtime's worker threads.
async fn with_client<F, T>(server: &MockServer, call: F) -> T
where
    F: FnOnce(&Client) -> T + Send + 'static,
    T: Send + 'static,
{
    let config =
        ClientConfig::new(APP_ID, API_KEY).with_base_url(format!("{}/api/v1/", server.uri()));
    tokio::task::spawn_blocking(move || {
        let client = Client::new(config).unwrap();
        call(&client)
    })
    .await
    .unwrap()
}

fn expect_api_error(result: onesignal_client::Result<onesignal_client::HttpResponse>) -> ApiError {
    match result {
        Err(Error::Api(err)) => err,
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notifications"))
        .and(header("Authorization", "Basic test-rest-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "contents": {"en": "English Message"},
            "included_segments": ["Subscribed Users"],
            "app_id": APP_ID,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "458dcec4-cf53-11e3-add2-000c2940e62c", "recipients": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notification = Notification::new()
        .content("en", "English Message")
        .included_segments(["Subscribed Users"]);
    let created: CreateNotificationResponse = with_client(&server, move |client| {
        client.create_notification(&notification)?.json()
    })
    .await
    .unwrap();

    assert_eq!(created.id, "458dcec4-cf53-11e3-add2-000c2940e62c");
    assert_eq!(created.recipients, 3);
}

#[tokio::test]
async fn test_fetch_notifications_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/notifications"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(query_param("kind", "1"))
        .and(query_param("app_id", APP_ID))
        .and(header("Authorization", "Basic test-rest-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1, "offset": 20, "limit": 10, "notifications": [{"id": "n-1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(&server, |client| {
        client.fetch_notifications(&NotificationsQuery {
            page_limit: 10,
            page_offset: 20,
            kind: Some(1),
        })
    })
    .await
    .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_fetch_players() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/players"))
        .and(query_param("app_id", APP_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2, "offset": 0, "limit": 300,
            "players": [{"id": "p-1"}, {"id": "p-2"}]
        })))
        .mount(&server)
        .await;

    let players: PlayerList = with_client(&server, |client| client.fetch_players()?.json())
        .await
        .unwrap();
    assert_eq!(players.total_count, 2);
    assert_eq!(players.players.len(), 2);
}

#[tokio::test]
async fn test_delete_player_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/players/p-1"))
        .and(query_param("app_id", APP_ID))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(&server, |client| client.delete_player("p-1"))
        .await
        .unwrap();
    assert_eq!(response.status, 204);
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_csv_export() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/players/csv_export"))
        .and(query_param("app_id", APP_ID))
        .and(body_json(json!({
            "extra_fields": ["country"],
            "app_id": APP_ID,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"csv_file_url": "https://files.test/export.csv.gz"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let export: CsvExportResponse = with_client(&server, |client| {
        client
            .csv_export(&CsvExport {
                extra_fields: Some(vec!["country".to_string()]),
                ..Default::default()
            })?
            .json()
    })
    .await
    .unwrap();
    assert_eq!(export.csv_file_url, "https://files.test/export.csv.gz");
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/notifications/n-1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"errors": ["Internal Server Error"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = expect_api_error(
        with_client(&server, |client| client.fetch_notification("n-1")).await,
    );
    assert_eq!(err, ApiError::Server("Internal Server Error".to_string()));
}

#[tokio::test]
async fn test_bad_gateway_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/players"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_raw("<html><body>Bad Gateway</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = expect_api_error(with_client(&server, |client| client.fetch_players()).await);
    assert_eq!(err, ApiError::Server("Error code 502".to_string()));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notifications"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"errors": ["API rate limit exceeded"]})),
        )
        .mount(&server)
        .await;

    let err = expect_api_error(
        with_client(&server, |client| {
            client.create_notification(&json!({"contents": {"en": "hi"}}))
        })
        .await,
    );
    assert_eq!(err, ApiError::RateLimit("API rate limit exceeded".to_string()));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_invalid_player_ids_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notifications"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [["invalid_player_ids", "All included players are not subscribed"]]
        })))
        .mount(&server)
        .await;

    let err = expect_api_error(
        with_client(&server, |client| {
            client.create_notification(&json!({"include_player_ids": ["p-9"]}))
        })
        .await,
    );
    assert_eq!(
        err,
        ApiError::InvalidPlayerIds("All included players are not subscribed".to_string())
    );
}

#[tokio::test]
async fn test_errors_with_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notifications"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"errors": ["Internal Server Error"]})),
        )
        .mount(&server)
        .await;

    let err = expect_api_error(
        with_client(&server, |client| client.create_notification(&json!({}))).await,
    );
    assert_eq!(err, ApiError::Client("Internal Server Error".to_string()));
}

#[tokio::test]
async fn test_unauthorized_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/players/p-1"))
        .respond_with(ResponseTemplate::new(401).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let err = expect_api_error(
        with_client(&server, |client| client.fetch_player("p-1")).await,
    );
    assert!(matches!(err, ApiError::Client(ref msg) if msg.starts_with("Error code 401")));
}

#[test]
fn test_connection_failure_is_transport_error() {
    let config = ClientConfig::new(APP_ID, API_KEY).with_base_url("http://127.0.0.1:1/api/v1");
    let client = Client::new(config).unwrap();
    let result = client.fetch_players();
    assert!(matches!(result, Err(Error::Http(_))));
}
