use crate::{
    classify::classify,
    config::ClientConfig,
    payload::{prepare_body, CsvExport, NotificationsQuery, APP_ID_FIELD},
    transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport},
    Result,
};
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

static HEADER_AUTHORIZATION: &str = "Authorization";
static HEADER_CONTENT_TYPE: &str = "Content-Type";
static CONTENT_TYPE_JSON: &str = "application/json";

/// Client for the push-notification REST API. Every call is a single blocking
/// request whose response is classified before it is returned.
pub struct Client<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Builds a client from `ONESIGNAL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Notifications
    pub fn create_notification<P>(&self, payload: &P) -> Result<HttpResponse>
    where
        P: Serialize + ?Sized,
    {
        self.post("notifications", payload)
    }

    pub fn fetch_notification(&self, id: &str) -> Result<HttpResponse> {
        self.get(&format!("notifications/{}", urlencoding::encode(id)))
    }

    pub fn fetch_notifications(&self, query: &NotificationsQuery) -> Result<HttpResponse> {
        self.get(&query.path())
    }

    // Players
    pub fn fetch_players(&self) -> Result<HttpResponse> {
        self.get("players")
    }

    pub fn fetch_player(&self, id: &str) -> Result<HttpResponse> {
        self.get(&format!("players/{}", urlencoding::encode(id)))
    }

    pub fn delete_player(&self, id: &str) -> Result<HttpResponse> {
        self.delete(&format!("players/{}", urlencoding::encode(id)))
    }

    /// The app id travels twice here: in the query string and in the body.
    pub fn csv_export(&self, export: &CsvExport) -> Result<HttpResponse> {
        let path = format!(
            "players/csv_export?{}={}",
            APP_ID_FIELD,
            urlencoding::encode(self.config.app_id())
        );
        self.post(&path, &export.to_payload())
    }

    /// GET `path`, with the app id appended to the query string.
    pub fn get(&self, path: &str) -> Result<HttpResponse> {
        let url = self.url_with_app_id(path);
        self.request(HttpMethod::Get, url, None)
    }

    /// DELETE `path`, with the app id appended to the query string.
    pub fn delete(&self, path: &str) -> Result<HttpResponse> {
        let url = self.url_with_app_id(path);
        self.request(HttpMethod::Delete, url, None)
    }

    /// POST `payload` as JSON, minus its null fields and plus the app id.
    pub fn post<P>(&self, path: &str, payload: &P) -> Result<HttpResponse>
    where
        P: Serialize + ?Sized,
    {
        let body = prepare_body(payload, self.config.app_id())?;
        let body = serde_json::to_string(&body)?;
        self.request(HttpMethod::Post, self.url(path), Some(body))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url(),
            path.trim_start_matches('/')
        )
    }

    fn url_with_app_id(&self, path: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.url(path),
            separator,
            APP_ID_FIELD,
            urlencoding::encode(self.config.app_id())
        )
    }

    fn request(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let mut headers = HashMap::new();
        headers.insert(
            HEADER_AUTHORIZATION.to_string(),
            format!("Basic {}", self.config.api_key()),
        );
        if body.is_some() {
            headers.insert(
                HEADER_CONTENT_TYPE.to_string(),
                CONTENT_TYPE_JSON.to_string(),
            );
        }

        debug!(%method, %url, "sending request");
        let response = self.transport.execute(&HttpRequest {
            method,
            url,
            headers,
            body,
        })?;
        debug!(status = response.status, "received response");

        self.handle_response(response)
    }

    fn handle_response(&self, response: HttpResponse) -> Result<HttpResponse> {
        match classify(response.status, response.body.as_deref()) {
            Ok(()) => Ok(response),
            Err(err) => {
                warn!(
                    status = response.status,
                    kind = err.kind(),
                    message = err.message(),
                    "request failed"
                );
                Err(err.into())
            }
        }
    }
}
