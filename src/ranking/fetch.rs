// src/ranking/fetch.rs
// =============================================================================
// This module fetches the metadata of ONE repository from the GitHub API.
//
// Key functionality:
// - Makes a single GET request to https://api.github.com/repos/<owner>/<name>
// - Attaches the bearer token when we have one
// - Decodes the JSON body into a RepoRecord
// - Turns every failure into a FetchError value instead of panicking
//
// The HTTP status is not looked at. GitHub reports problems (404, bad
// credentials, rate limit) with a JSON body like {"message": "..."} that does
// not have the repository fields, and the decode step catches exactly that.
//
// Rust concepts:
// - async/await: the request suspends without blocking sibling requests
// - Result<T, E>: the outcome of a fetch is a plain value
// - serde: declarative decoding, missing fields become errors
// =============================================================================

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{FetchError, TransportCause};
use crate::extract::Endpoint;

/// One repository in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRecord {
    pub name: String,
    pub owner: String,
    /// Star count, the value the ranking is sorted by
    #[serde(rename = "stargazers")]
    pub popularity: u64,
    /// Browser URL of the repository (html_url)
    pub url: String,
}

// Media type of GitHub's REST API responses
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Result of one fetch attempt: a record or the reason there is none.
pub type FetchOutcome = Result<RepoRecord, FetchError>;

// The part of GitHub's repository object we care about.
// Unknown fields are ignored by serde by default.
#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: OwnerPayload,
    stargazers_count: u64,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl From<RepoPayload> for RepoRecord {
    fn from(payload: RepoPayload) -> Self {
        RepoRecord {
            name: payload.name,
            owner: payload.owner.login,
            popularity: payload.stargazers_count,
            url: payload.html_url,
        }
    }
}

// Fetches a single repository's metadata
//
// Parameters:
//   client: shared HTTP client (connection pool + per-request timeout)
//   endpoint: the API URL of the repository
//   credential: optional token, sent as "Authorization: Bearer <token>"
//
// Returns: FetchOutcome. Failures are logged here at error level, so callers
// can drop them without losing the diagnostic.
pub async fn fetch_repo(
    client: &Client,
    endpoint: &Endpoint,
    credential: Option<&str>,
) -> FetchOutcome {
    let outcome = request_repo(client, endpoint, credential).await;

    if let Err(e) = &outcome {
        error!(endpoint = e.endpoint(), kind = e.kind(), error = %e, "Repository fetch failed");
    }

    outcome
}

async fn request_repo(
    client: &Client,
    endpoint: &Endpoint,
    credential: Option<&str>,
) -> FetchOutcome {
    let transport = |source: TransportCause| FetchError::Transport {
        endpoint: endpoint.to_string(),
        source,
    };

    let mut request = client.get(endpoint.as_str()).header(ACCEPT, GITHUB_JSON);
    if let Some(token) = credential {
        request = request.bearer_auth(token);
    }

    debug!(endpoint = %endpoint, "Beginning request");
    let response = request.send().await.map_err(|e| transport(e.into()))?;
    debug!(endpoint = %endpoint, status = response.status().as_u16(), "Got response");

    // Read the body even for 4xx/5xx, the JSON inside tells us what went wrong
    let body = response.text().await.map_err(|e| transport(e.into()))?;
    let value: Value = serde_json::from_str(&body).map_err(|e| transport(e.into()))?;

    decode_record(endpoint, value)
}

// Maps a decoded JSON value onto a RepoRecord
fn decode_record(endpoint: &Endpoint, value: Value) -> FetchOutcome {
    // Error payloads look like {"message": "Bad credentials", ...}
    let api_message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    match serde_json::from_value::<RepoPayload>(value) {
        Ok(payload) => Ok(payload.into()),
        Err(e) => {
            let reason = match api_message {
                Some(message) => format!("{} (API message: {})", e, message),
                None => e.to_string(),
            };
            Err(FetchError::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn repo_json(owner: &str, name: &str, stars: u64) -> Value {
        json!({
            "id": 1296269,
            "name": name,
            "full_name": format!("{}/{}", owner, name),
            "owner": { "login": owner, "id": 1 },
            "stargazers_count": stars,
            "html_url": format!("https://github.com/{}/{}", owner, name),
            "fork": false
        })
    }

    fn endpoint(server: &MockServer, owner: &str, name: &str) -> Endpoint {
        Endpoint::from(format!("{}/repos/{}/{}", server.uri(), owner, name))
    }

    #[tokio::test]
    async fn test_success_maps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("octocat", "Hello-World", 80)))
            .mount(&server)
            .await;

        let record = fetch_repo(&Client::new(), &endpoint(&server, "octocat", "Hello-World"), None)
            .await
            .unwrap();

        assert_eq!(
            record,
            RepoRecord {
                name: "Hello-World".to_string(),
                owner: "octocat".to_string(),
                popularity: 80,
                url: "https://github.com/octocat/Hello-World".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_credential_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("a", "b", 1)))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = fetch_repo(&Client::new(), &endpoint(&server, "a", "b"), Some("secret-token")).await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_no_credential_no_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("a", "b", 1)))
            .mount(&server)
            .await;

        fetch_repo(&Client::new(), &endpoint(&server, "a", "b"), None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_api_request_asks_for_github_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .and(header("accept", GITHUB_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("a", "b", 1)))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = fetch_repo(&Client::new(), &endpoint(&server, "a", "b"), None).await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_not_found_payload_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/gone/away"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let err = fetch_repo(&Client::new(), &endpoint(&server, "gone", "away"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::MalformedResponse { .. }));
        assert!(err.to_string().contains("Not Found"));
        assert!(err.endpoint().ends_with("/repos/gone/away"));
    }

    #[tokio::test]
    async fn test_missing_nested_owner_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "b",
                "owner": {},
                "stargazers_count": 3,
                "html_url": "https://github.com/a/b"
            })))
            .mount(&server)
            .await;

        let err = fetch_repo(&Client::new(), &endpoint(&server, "a", "b"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
            .mount(&server)
            .await;

        let err = fetch_repo(&Client::new(), &endpoint(&server, "a", "b"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/slow/repo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(repo_json("slow", "repo", 1))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = fetch_repo(&client, &endpoint(&server, "slow", "repo"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 1 is reserved and nothing listens there
        let endpoint = Endpoint::from("http://127.0.0.1:1/repos/a/b".to_string());
        let err = fetch_repo(&Client::new(), &endpoint, None).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn test_record_serializes_stargazers() {
        let record = RepoRecord {
            name: "b".to_string(),
            owner: "a".to_string(),
            popularity: 7,
            url: "https://github.com/a/b".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["stargazers"], 7);
        assert!(value.get("popularity").is_none());
    }
}
