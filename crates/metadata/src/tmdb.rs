//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use peekr_core::types::TitleQuery;
use tracing::{debug, warn};

use crate::provider::TitleProvider;
use crate::{MetadataError, TitleRecord};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const LANGUAGE: &str = "en-US";

/// How the TMDB credential is attached to each request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// v3 API key sent as the `api_key` query parameter.
    ApiKeyInQuery(String),
    /// v4 read access token sent as `Authorization: Bearer …`.
    BearerHeader(String),
}

impl AuthMode {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKeyInQuery(_) => "api_key",
            Self::BearerHeader(_) => "bearer",
        }
    }
}

impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthMode::{}(<redacted>)", self.kind())
    }
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub auth: AuthMode,
    pub base_url: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(auth: AuthMode) -> Self {
        Self {
            auth,
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct TmdbClient {
    auth: AuthMode,
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        let base_url = reqwest::Url::parse(&config.base_url)
            .map_err(|e| MetadataError::BaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(MetadataError::BaseUrl(config.base_url));
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            auth: config.auth,
            base_url,
            client,
        })
    }

    /// Endpoint URL with each segment percent-encoded on its own, so a `/`
    /// or `..` inside an id can never leave the per-title endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, MetadataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MetadataError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<serde_json::Value, MetadataError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, auth = self.auth.kind(), "TMDB request");

        let mut req = self.client.get(url).query(&[("language", LANGUAGE)]);
        req = match &self.auth {
            AuthMode::ApiKeyInQuery(key) => req.query(&[("api_key", key.as_str())]),
            AuthMode::BearerHeader(token) => req.bearer_auth(token),
        };

        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(MetadataError::Status(resp.status().as_u16()));
        }

        resp.json().await.map_err(MetadataError::from)
    }
}

#[async_trait::async_trait]
impl TitleProvider for TmdbClient {
    async fn fetch_record(&self, query: &TitleQuery) -> Option<TitleRecord> {
        match self
            .get_json(&[query.media_type.as_str(), query.id.as_str()])
            .await
        {
            Ok(data) => Some(TitleRecord::from_json(&data)),
            Err(e) => {
                warn!(title = %query, error = %e, "TMDB lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peekr_core::types::MediaType;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, auth: AuthMode) -> TmdbClient {
        TmdbClient::new(TmdbConfig {
            auth,
            base_url: server.uri(),
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn api_key_mode_sends_key_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/27205"))
            .and(query_param("api_key", "secret-key"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Inception",
                "overview": "A thief...",
                "poster_path": "/abc.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("secret-key".into()));
        let record = client
            .fetch_record(&TitleQuery::new(MediaType::Movie, "27205"))
            .await
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("Inception"));
        assert_eq!(record.poster_path.as_deref(), Some("/abc.jpg"));
    }

    #[tokio::test]
    async fn bearer_mode_sends_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/1399"))
            .and(header("authorization", "Bearer read-token"))
            .and(query_param_is_missing("api_key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "name": "Game of Thrones" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::BearerHeader("read-token".into()));
        let record = client
            .fetch_record(&TitleQuery::new(MediaType::Tv, "1399"))
            .await
            .unwrap();

        assert_eq!(record.name.as_deref(), Some("Game of Thrones"));
        assert_eq!(record.title, None);
    }

    #[tokio::test]
    async fn non_success_status_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/1399"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("k".into()));
        assert!(
            client
                .fetch_record(&TitleQuery::new(MediaType::Tv, "1399"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn id_is_passed_through_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/not-a-number"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("k".into()));
        let record = client
            .fetch_record(&TitleQuery::new(MediaType::Movie, "not-a-number"))
            .await;
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "title": "Too Late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("k".into()));
        assert!(
            client
                .fetch_record(&TitleQuery::new(MediaType::Movie, "1"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn malformed_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("k".into()));
        assert!(
            client
                .fetch_record(&TitleQuery::new(MediaType::Movie, "1"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn id_with_slashes_stays_in_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/person/287"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Brad Pitt" })),
            )
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/movie/..%2Fperson%2F287"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthMode::ApiKeyInQuery("k".into()));
        let record = client
            .fetch_record(&TitleQuery::new(MediaType::Movie, "../person/287"))
            .await;
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn base_url_path_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/1399"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "name": "Game of Thrones" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(TmdbConfig {
            auth: AuthMode::ApiKeyInQuery("k".into()),
            base_url: format!("{}/3/", server.uri()),
            timeout: Duration::from_millis(200),
        })
        .unwrap();
        let record = client
            .fetch_record(&TitleQuery::new(MediaType::Tv, "1399"))
            .await
            .unwrap();
        assert_eq!(record.name.as_deref(), Some("Game of Thrones"));
    }

    #[test]
    fn rejects_unusable_base_url() {
        for base_url in ["not a url", "mailto:tmdb@example.com"] {
            let config = TmdbConfig {
                base_url: base_url.to_string(),
                ..TmdbConfig::new(AuthMode::ApiKeyInQuery("k".into()))
            };
            assert!(matches!(
                TmdbClient::new(config),
                Err(MetadataError::BaseUrl(_))
            ));
        }
    }

    #[test]
    fn auth_mode_debug_hides_credential() {
        let shown = format!("{:?}", AuthMode::BearerHeader("super-secret".into()));
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("bearer"));
    }
}
