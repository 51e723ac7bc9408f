//! HTTP client for the SmartBooking REST API.

use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    query::{ListQuery, Query},
    types::{ListBody, ListResult, LoginRequest, LoginResponse, RecordId},
    Error, Session,
};

/// Path of the department collection.
pub const DEPARTMENT_RESOURCE: &str = "/Department";
/// Path of the user collection.
pub const USER_RESOURCE: &str = "/User";
const LOGIN_PATH: &str = "/Auth/login";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the SmartBooking API.
///
/// Attaches `Authorization: Bearer <token>` to every request while the
/// [`Session`] holds a token. The token is read at send time, so a login
/// through any clone of the session is picked up by later requests.
#[derive(Clone)]
pub struct Client {
    /// Base URL every path is appended to, e.g. `https://host/api`.
    base_api_url: String,
    http: reqwest::Client,
    session: Session,
}

impl Client {
    /// Creates a client for `base_url` with the default 30-second timeout.
    pub fn new(base_url: &str, session: Session) -> Result<Self, Error> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, session: Session, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", self.base_api_url, path, e))
        })
    }

    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<String, Error>
    where
        B: Serialize + ?Sized,
    {
        let token = self.session.token();
        tracing::debug!(
            "{} {} (bearer token: {})",
            method,
            url,
            if token.is_some() { "attached" } else { "none" }
        );

        let mut req = self
            .http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*");
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            Error::Network
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&text);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(text)
    }

    async fn get<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let body = self.send::<()>(Method::GET, url, None).await?;
        parse_body(&body)
    }

    /// Sends a request to `path` and returns the decoded JSON body.
    ///
    /// An empty success body comes back as `Value::Null`.
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path)?;
        let text = self.send(method, url, body).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        parse_body(&text)
    }

    /// Fetches one page of `resource`.
    ///
    /// Sends `GET <resource>?$skip=..&$top=..[&$orderby=..][&$filter=..]&$count=true`.
    pub async fn fetch_list<T>(&self, resource: &str, query: &ListQuery) -> Result<ListResult<T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut url = self.get_url(resource)?;
        url.set_query(Some(&format!("{}&$count=true", query.encode())));
        let body: ListBody<T> = self.get(url).await?;
        Ok(body.into())
    }

    /// Fetches a single record by id.
    pub async fn get_record<T>(&self, resource: &str, id: RecordId) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(&format!("{}/{}", resource, id))?;
        self.get(url).await
    }

    /// `POST <resource>` with the payload as JSON.
    pub async fn create<B>(&self, resource: &str, payload: &B) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, resource, Some(payload)).await
    }

    /// `PUT <resource>/<id>` with the payload as JSON.
    pub async fn update<B>(&self, resource: &str, id: RecordId, payload: &B) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, &format!("{}/{}", resource, id), Some(payload))
            .await
    }

    /// `PUT <resource>/delete` with the ids as a JSON array.
    pub async fn delete_many(&self, resource: &str, ids: &[RecordId]) -> Result<Value, Error> {
        self.request(Method::PUT, &format!("{}/delete", resource), Some(ids))
            .await
    }

    /// `PUT <resource>/enable` or `PUT <resource>/disable` with the ids as a JSON array.
    pub async fn set_active(&self, resource: &str, ids: &[RecordId], active: bool) -> Result<Value, Error> {
        let action = if active { "enable" } else { "disable" };
        self.request(Method::PUT, &format!("{}/{}", resource, action), Some(ids))
            .await
    }

    /// Logs in and stores the returned token in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        let body = LoginRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        let url = self.get_url(LOGIN_PATH)?;
        let text = self.send(Method::POST, url, Some(&body)).await?;
        let resp: LoginResponse = parse_body(&text)?;
        self.session.set_token(&resp.token);
        tracing::info!("Logged in as {}", username);
        Ok(resp)
    }

    /// Drops the session token. Later requests go out unauthenticated.
    pub fn logout(&self) {
        self.session.clear();
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::ParseFailed(e.to_string())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(1500);
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
        assert!(snippet.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = Client::new("https://example.com/api/", Session::new()).unwrap();
        assert_eq!(client.base_url(), "https://example.com/api");
        let url = client.get_url(DEPARTMENT_RESOURCE).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/Department");
    }
}
