use super::dto::{merge_summary, QueryLogResponse, SummaryResponse, UpstreamsResponse};
use async_trait::async_trait;
use pihole_exporter_application::ports::QuerySource;
use pihole_exporter_domain::config::SourceConfig;
use pihole_exporter_domain::{ExporterError, QueryRecord, SummaryTotals};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Pi-hole v6 HTTP API client.
///
/// Authenticates with `POST /api/auth` for a session id that is sent
/// as the `sid` header. An expired session (401) triggers one
/// re-authentication and a retry of the call; a second rejection
/// surfaces `SourceUnavailable` for the next cycle to retry.
pub struct PiholeClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    sid: RwLock<Option<String>>,
}

#[derive(serde::Deserialize)]
struct AuthResponse {
    session: AuthSession,
}

#[derive(serde::Deserialize)]
struct AuthSession {
    sid: String,
}

impl PiholeClient {
    pub fn new(config: &SourceConfig, api_token: Option<String>) -> Result<Self, ExporterError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExporterError::SourceUnavailable(e.to_string()))?;

        if api_token.is_none() {
            warn!("no API token provided, some data may not be available");
        }

        Ok(Self {
            http,
            base_url: format!("https://{}:{}/api", config.host, config.port),
            api_token,
            sid: RwLock::new(None),
        })
    }

    async fn authenticate(&self) -> Result<String, ExporterError> {
        let token = self
            .api_token
            .as_deref()
            .ok_or_else(|| ExporterError::SourceUnavailable("no API token".to_string()))?;

        let response = self
            .http
            .post(format!("{}/auth", self.base_url))
            .header("accept", "application/json")
            .json(&json!({ "password": token }))
            .send()
            .await
            .map_err(|e| ExporterError::SourceUnavailable(format!("auth request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ExporterError::SourceUnavailable(format!(
                "auth rejected with status {}",
                response.status()
            )));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ExporterError::SourceData(format!("malformed auth response: {e}")))?;

        info!("authenticated with Pi-hole API");
        Ok(auth.session.sid)
    }

    async fn session_id(&self) -> Result<Option<String>, ExporterError> {
        if self.api_token.is_none() {
            return Ok(None);
        }
        if let Some(sid) = self.sid.read().await.clone() {
            return Ok(Some(sid));
        }
        let sid = self.authenticate().await?;
        *self.sid.write().await = Some(sid.clone());
        Ok(Some(sid))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExporterError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut reauthenticated = false;

        loop {
            let mut request = self.http.get(&url).header("accept", "application/json");
            if let Some(sid) = self.session_id().await? {
                request = request.header("sid", sid);
            }

            let response = request.send().await.map_err(|e| {
                ExporterError::SourceUnavailable(format!("API call {path} failed: {e}"))
            })?;

            if response.status() == StatusCode::UNAUTHORIZED
                && self.api_token.is_some()
                && !reauthenticated
            {
                debug!(path, "session expired, re-authenticating");
                reauthenticated = true;
                let sid = self.authenticate().await?;
                *self.sid.write().await = Some(sid);
                continue;
            }

            if !response.status().is_success() {
                return Err(ExporterError::SourceUnavailable(format!(
                    "API call {path} failed with status {}",
                    response.status()
                )));
            }

            return response.json::<T>().await.map_err(|e| {
                ExporterError::SourceData(format!("malformed response from {path}: {e}"))
            });
        }
    }
}

#[async_trait]
impl QuerySource for PiholeClient {
    async fn fetch_query_log(
        &self,
        since: i64,
        until: i64,
    ) -> Result<Vec<QueryRecord>, ExporterError> {
        let response: QueryLogResponse = self
            .get_json(&format!(
                "queries?from={since}&until={until}&length=1000000"
            ))
            .await?;

        let (records, parse_errors) = response.into_records();
        if parse_errors > 0 {
            warn!(parse_errors, "dropped malformed query records");
        }
        debug!(records = records.len(), since, until, "fetched query log");
        Ok(records)
    }

    async fn fetch_summary(&self) -> Result<SummaryTotals, ExporterError> {
        let summary: SummaryResponse = self.get_json("stats/summary").await?;
        let upstreams: UpstreamsResponse = self.get_json("stats/upstreams").await?;
        Ok(merge_summary(summary, upstreams))
    }
}
