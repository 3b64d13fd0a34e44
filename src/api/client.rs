use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::ContactsApi;
use crate::api::models::{
    Contact, ContactDraft, ContactId, Credentials, LoginResponse, Page, PageRequest,
    PasswordChange, Profile, Registration,
};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::with_http(http, &config.api_url)
    }

    pub fn with_http(http: HttpClient, base_url: &str) -> Result<Self> {
        let base = Url::parse(&base_api(base_url))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base.as_str().trim_end_matches('/'), path))?)
    }

    fn with_auth(req: RequestBuilder, session: &Session) -> RequestBuilder {
        req.bearer_auth(&session.token)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.endpoint("users/login")?;
        debug!("POST {url}");
        let resp = self.http.post(url).json(credentials).send().await?;
        let body: LoginResponse = decode(resp).await?;
        Ok(Session { token: body.token, user: body.user })
    }

    pub async fn register(&self, registration: &Registration) -> Result<Profile> {
        let url = self.endpoint("users/register")?;
        debug!("POST {url}");
        let resp = self.http.post(url).json(registration).send().await?;
        decode(resp).await
    }

    pub async fn list_contacts(&self, session: &Session, request: PageRequest) -> Result<Page> {
        let url = contacts_url(&self.endpoint("contacts")?, request);
        debug!("GET {url}");
        let resp = Self::with_auth(self.http.get(url), session).send().await?;
        decode(resp).await
    }

    pub async fn get_contact(&self, session: &Session, id: ContactId) -> Result<Contact> {
        let url = self.endpoint(&format!("contacts/{id}"))?;
        debug!("GET {url}");
        let resp = Self::with_auth(self.http.get(url), session).send().await?;
        decode(resp).await
    }

    pub async fn create_contact(&self, session: &Session, draft: &ContactDraft) -> Result<Contact> {
        let url = self.endpoint("contacts")?;
        debug!("POST {url}");
        let resp = Self::with_auth(self.http.post(url), session).json(draft).send().await?;
        decode(resp).await
    }

    pub async fn update_contact(
        &self,
        session: &Session,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact> {
        let url = self.endpoint(&format!("contacts/{id}"))?;
        debug!("PUT {url}");
        let resp = Self::with_auth(self.http.put(url), session).json(draft).send().await?;
        decode(resp).await
    }

    pub async fn delete_contact(&self, session: &Session, id: ContactId) -> Result<()> {
        let url = self.endpoint(&format!("contacts/{id}"))?;
        debug!("DELETE {url}");
        let resp = Self::with_auth(self.http.delete(url), session).send().await?;
        expect_success(resp).await
    }

    pub async fn profile(&self, session: &Session) -> Result<Profile> {
        let url = self.endpoint("users/profile")?;
        debug!("GET {url}");
        let resp = Self::with_auth(self.http.get(url), session).send().await?;
        decode(resp).await
    }

    pub async fn update_profile(&self, session: &Session, name: &str) -> Result<Profile> {
        let url = self.endpoint("users/update-profile")?;
        debug!("PUT {url}");
        let body = serde_json::json!({ "name": name });
        let resp = Self::with_auth(self.http.put(url), session).json(&body).send().await?;
        decode(resp).await
    }

    pub async fn change_password(&self, session: &Session, change: &PasswordChange) -> Result<()> {
        let url = self.endpoint("users/change-password")?;
        debug!("PUT {url}");
        let resp = Self::with_auth(self.http.put(url), session).json(change).send().await?;
        expect_success(resp).await
    }
}

impl ContactsApi for ApiClient {
    async fn list_contacts(&self, session: &Session, request: PageRequest) -> Result<Page> {
        ApiClient::list_contacts(self, session, request).await
    }

    async fn delete_contact(&self, session: &Session, id: ContactId) -> Result<()> {
        ApiClient::delete_contact(self, session, id).await
    }
}

/// API root for a user-supplied server address: scheme added when missing, `/api` appended once.
pub fn base_api(base_url: &str) -> String {
    let normalized = crate::utils::normalize_url(base_url);
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.ends_with("/api") { trimmed.to_string() } else { format!("{}/api", trimmed) }
}

pub fn contacts_url(endpoint: &Url, request: PageRequest) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("page", &request.page.to_string())
        .append_pair("size", &request.size.to_string())
        .append_pair("sortBy", PageRequest::SORT_BY)
        .append_pair("sortDir", PageRequest::SORT_DIR);
    url
}

/// Maps a non-success status and its body to the error the screens report.
pub fn rejection(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::Unauthenticated;
    }
    Error::ServerRejected { status: status.as_u16(), message: server_message(body) }
}

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        if let Some(msg) = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str())
        {
            return Some(msg.to_string());
        }
        if json.is_object() {
            return None;
        }
    }
    Some(trimmed.to_string())
}

async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().clone();
    let body = resp.text().await.unwrap_or_default();
    warn!("{url} rejected with HTTP {status}");
    Err(rejection(status, &body))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let resp = check(resp).await?;
    Ok(resp.json::<T>().await?)
}

async fn expect_success(resp: Response) -> Result<()> {
    check(resp).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::PageSize;

    #[test]
    fn base_api_appends_api_once() {
        assert_eq!(base_api("localhost:8080"), "https://localhost:8080/api");
        assert_eq!(base_api("http://localhost:8080/"), "http://localhost:8080/api");
        assert_eq!(base_api("http://localhost:8080/api/"), "http://localhost:8080/api");
    }

    #[test]
    fn contacts_url_carries_paging_and_sort() {
        let client = ApiClient::with_http(HttpClient::new(), "http://localhost:8080").unwrap();
        let endpoint = client.endpoint("contacts").unwrap();
        let url = contacts_url(&endpoint, PageRequest::new(2, PageSize::try_from(25).unwrap()));
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/contacts?page=2&size=25&sortBy=firstName&sortDir=asc"
        );
    }

    #[test]
    fn unauthorized_means_log_in_again() {
        assert!(matches!(rejection(StatusCode::UNAUTHORIZED, ""), Error::Unauthenticated));
    }

    #[test]
    fn rejection_keeps_plain_text_and_json_messages() {
        match rejection(StatusCode::CONFLICT, "Email already exists") {
            Error::ServerRejected { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("Email already exists"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match rejection(StatusCode::BAD_REQUEST, r#"{"message":"Name cannot be empty"}"#) {
            Error::ServerRejected { message, .. } => {
                assert_eq!(message.as_deref(), Some("Name cannot be empty"))
            }
            other => panic!("unexpected {other:?}"),
        }
        match rejection(StatusCode::INTERNAL_SERVER_ERROR, "  ") {
            Error::ServerRejected { message, .. } => assert_eq!(message, None),
            other => panic!("unexpected {other:?}"),
        }
    }
}
