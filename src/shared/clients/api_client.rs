use std::any::type_name;
use std::marker::PhantomData;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::shared::errors::FetchError;

/// 외부 API 요청 타임아웃 (초)
/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// 인증된 GET 요청을 보내는 외부 API 클라이언트
/// A client for one external endpoint, called through [`make_request`].
///
/// Implementors name the endpoint path and turn the decoded JSON body into
/// their response type. Everything else (URL building, bearer auth, query
/// flattening, timeout, error logging) is shared.
pub trait ApiClient {
    /// Flattened into query parameters; `#[serde(rename = "...")]` aliases are what goes on the wire.
    type Request: Serialize;
    type Response;

    /// Appended verbatim to the base URL.
    fn endpoint_path(&self) -> &str;

    fn parse_response(&self, json: serde_json::Value) -> anyhow::Result<Self::Response>;
}

/// 인증된 GET 요청 수행 후 응답 파싱
/// Perform one authenticated GET against `{base_url}{endpoint}` and parse the JSON body.
///
/// No retries. The HTTP client lives only for this call.
pub async fn make_request<C>(
    client: &C,
    request: &C::Request,
    access_token: &str,
    base_url: &str,
) -> Result<C::Response, FetchError>
where
    C: ApiClient + ?Sized,
{
    make_request_with_timeout(client, request, access_token, base_url, REQUEST_TIMEOUT).await
}

// URL 생성 (슬래시 정규화 없음)
// Plain concatenation: "https://api.example.com/" + "/v1" keeps both slashes
fn request_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url, endpoint)
}

pub(crate) async fn make_request_with_timeout<C>(
    client: &C,
    request: &C::Request,
    access_token: &str,
    base_url: &str,
    timeout: Duration,
) -> Result<C::Response, FetchError>
where
    C: ApiClient + ?Sized,
{
    let url = request_url(base_url, client.endpoint_path());

    let params = match serde_urlencoded::to_string(request) {
        Ok(params) => params,
        Err(err) => {
            error!(url = %url, error = %err, "Failed to encode query parameters");
            return Err(FetchError::Query(err));
        }
    };

    let http_client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(http_client) => http_client,
        Err(err) => {
            error!(url = %url, error = %err, "Failed to create HTTP client");
            return Err(FetchError::Transport(err));
        }
    };

    // HTTP GET 요청
    let response = match http_client
        .get(&url)
        .bearer_auth(access_token)
        .query(request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            error!(url = %url, error = %err, "An error occurred while making request");
            return Err(FetchError::Transport(err));
        }
    };

    // HTTP 상태 코드 확인
    // Check HTTP status code
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(
            url = %url,
            status = status.as_u16(),
            body = %body,
            "Error response while making request"
        );
        return Err(FetchError::Status { status, body });
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            error!(url = %url, error = %err, "An error occurred while reading response body");
            return Err(FetchError::Transport(err));
        }
    };

    info!(
        client = type_name::<C>(),
        params = %params,
        "Request successful"
    );

    // JSON 파싱: 원인 메시지는 로그에 남기지 않음
    let parsed = serde_json::from_slice::<serde_json::Value>(&body)
        .context("Response body is not valid JSON")
        .and_then(|json| client.parse_response(json));

    parsed.map_err(|err| {
        error!(url = %url, params = %params, "An error occurred while parsing response");
        FetchError::Parse(err)
    })
}

/// serde로 바로 역직렬화되는 엔드포인트
/// An [`ApiClient`] whose response is plain serde deserialization of the body.
pub struct JsonEndpoint<Req, Resp> {
    path: String,
    _types: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> JsonEndpoint<Req, Resp> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            _types: PhantomData,
        }
    }
}

impl<Req, Resp> ApiClient for JsonEndpoint<Req, Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    type Request = Req;
    type Response = Resp;

    fn endpoint_path(&self) -> &str {
        &self.path
    }

    fn parse_response(&self, json: serde_json::Value) -> anyhow::Result<Resp> {
        Ok(serde_json::from_value(json)?)
    }
}
