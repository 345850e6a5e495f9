// =====================================================
// 외부 API 클라이언트 테스트
// =====================================================
// wiremock 서버를 대상으로 make_request의 URL/헤더/쿼리/에러/로그 동작 검증
// =====================================================

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context as _;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument::WithSubscriber;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use identity_api::shared::clients::{ApiClient, JsonEndpoint, make_request};
use identity_api::shared::errors::FetchError;

const TOKEN: &str = "secret-token";

#[derive(Serialize)]
struct LookupRequest {
    #[serde(rename = "username")]
    user_name: String,
}

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Lookup {
    id: u64,
    name: String,
}

struct LookupClient;

impl ApiClient for LookupClient {
    type Request = LookupRequest;
    type Response = Lookup;

    fn endpoint_path(&self) -> &str {
        "/v1/lookup"
    }

    fn parse_response(&self, json: Value) -> anyhow::Result<Lookup> {
        let id = json["id"].as_u64().context("missing id")?;
        let name = json["name"].as_str().context("missing name")?.to_uppercase();
        Ok(Lookup { id, name })
    }
}

fn ada() -> LookupRequest {
    LookupRequest {
        user_name: "ada".to_string(),
    }
}

/// identity_api 이벤트를 레벨별로 카운트
#[derive(Clone, Default)]
struct LogCounter {
    errors: Arc<AtomicUsize>,
    infos: Arc<AtomicUsize>,
}

impl LogCounter {
    fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    fn infos(&self) -> usize {
        self.infos.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for LogCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("identity_api") {
            return;
        }
        match *event.metadata().level() {
            Level::ERROR => {
                self.errors.fetch_add(1, Ordering::SeqCst);
            }
            Level::INFO => {
                self.infos.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

async fn fetch_logged<C: ApiClient>(
    client: &C,
    request: &C::Request,
    base_url: &str,
) -> (Result<C::Response, FetchError>, LogCounter) {
    let counter = LogCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let result = make_request(client, request, TOKEN, base_url)
        .with_subscriber(subscriber)
        .await;
    (result, counter)
}

#[tokio::test]
async fn success_returns_what_the_parser_returns() {
    let server = MockServer::start().await;
    let body = json!({ "id": 7, "name": "Ada" });
    Mock::given(method("GET"))
        .and(path("/v1/lookup"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(query_param("username", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;

    let expected = LookupClient.parse_response(body).unwrap();
    assert_eq!(result.unwrap(), expected);
    assert_eq!(expected.name, "ADA");
    assert_eq!(logs.infos(), 1);
    assert_eq!(logs.errors(), 0);
}

#[tokio::test]
async fn url_is_base_plus_endpoint_with_aliased_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "a" })))
        .mount(&server)
        .await;

    let (result, _) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;
    assert!(result.is_ok());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    // wiremock이 기록하는 호스트는 server.uri()와 다를 수 있음 (localhost)
    assert_eq!(requests[0].url.path(), "/v1/lookup");
    assert_eq!(requests[0].url.query(), Some("username=ada"));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_not_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "a" })))
        .mount(&server)
        .await;

    let base_url = format!("{}/", server.uri());
    let (result, _) = fetch_logged(&LookupClient, &ada(), &base_url).await;
    assert!(result.is_ok());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "//v1/lookup");
}

#[tokio::test]
async fn non_success_status_is_an_error_logged_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/lookup"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .expect(1)
        .mount(&server)
        .await;

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;

    match result {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "no such user");
        }
        other => panic!("expected status error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(logs.errors(), 1);
    assert_eq!(logs.infos(), 0);
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;

    let err = result.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert_eq!(logs.errors(), 1);
}

#[tokio::test]
async fn parser_failure_is_propagated_and_logged_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;

    match result {
        Err(FetchError::Parse(cause)) => assert_eq!(cause.to_string(), "missing id"),
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(logs.errors(), 1);
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &server.uri()).await;

    assert!(matches!(result, Err(FetchError::Parse(_))));
    assert_eq!(logs.errors(), 1);
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // 포트를 잡았다가 바로 닫아서 연결 거부 유도
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = format!("http://127.0.0.1:{}", port);

    let (result, logs) = fetch_logged(&LookupClient, &ada(), &base_url).await;

    match result {
        Err(FetchError::Transport(err)) => assert!(err.is_connect()),
        other => panic!("expected transport error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(logs.errors(), 1);
}

#[tokio::test]
async fn json_endpoint_deserializes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .and(query_param("username", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "name": "Ada" })))
        .mount(&server)
        .await;

    let endpoint = JsonEndpoint::<LookupRequest, Lookup>::new("/v2/users");
    let (result, _) = fetch_logged(&endpoint, &ada(), &server.uri()).await;

    assert_eq!(
        result.unwrap(),
        Lookup {
            id: 3,
            name: "Ada".to_string()
        }
    );
}
