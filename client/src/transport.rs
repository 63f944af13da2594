use std::{collections::HashMap, fmt, str::FromStr};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use crate::{Error, Result};

/// Performs one HTTP call and hands back the unmodified status and body.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `None` when the service sent no body at all.
    pub body: Option<String>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }

    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Deserializes the body. An absent body reads as JSON `null`.
    pub fn json<T>(&self) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        Ok(serde_json::from_str(self.body.as_deref().unwrap_or("null"))?)
    }
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_str(name)
                .map_err(|err| Error::InvalidHeader(format!("{}: {}", name, err)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| Error::InvalidHeader(format!("{}: {}", name.as_str(), err)))?;
            headers.insert(name, value);
        }

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        };

        let response = builder.headers(headers).send().map_err(Error::Http)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(Error::Http)?;

        Ok(HttpResponse {
            status,
            body: if body.is_empty() { None } else { Some(body) },
        })
    }
}
