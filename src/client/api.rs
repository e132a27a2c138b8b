//! Typed HTTP access to the API

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{
    error::ClientError,
    session::{Session, SessionStore, SessionUser},
};
use crate::constants::API_BASE_PATH;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
    user: SessionUser,
}

/// API client bound to a session store.
///
/// Every request carries the stored bearer token when there is one. A 401
/// on such a request drops the stored session.
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub async fn session(&self) -> Result<Option<Session>, ClientError> {
        self.store.load().await
    }

    /// Log in and persist the returned session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&Credentials { email, password });
        let reply: LoginReply = self.send(request, false).await?;

        let session = Session {
            token: reply.token,
            user: reply.user,
        };
        self.store.save(&session).await?;

        tracing::debug!(user_id = %session.user.id, "Logged in");
        Ok(session)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store.clear().await
    }

    /// Current user as the server sees it; requires a stored session
    pub async fn me(&self) -> Result<SessionUser, ClientError> {
        if self.store.load().await?.is_none() {
            return Err(ClientError::NotLoggedIn);
        }
        self.get("/auth/me").await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        self.call(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call(Method::DELETE, path, None::<&()>).await
    }

    /// Multipart upload, e.g. `/profile/resume` with field `resume`
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<T, ClientError> {
        let part = reqwest::multipart::Part::bytes(data).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);
        let request = self.http.post(self.url(path)).multipart(form);
        self.send(request, true).await
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, true).await
    }

    async fn send<T: DeserializeOwned>(&self, mut request: RequestBuilder, authorized: bool) -> Result<T, ClientError> {
        let mut bearer_sent = false;
        if authorized {
            if let Some(session) = self.store.load().await? {
                request = request.header(header::AUTHORIZATION, format!("Bearer {}", session.token));
                bearer_sent = true;
            }
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED && bearer_sent {
                tracing::debug!("Stored session rejected, clearing it");
                self.store.clear().await?;
            }
            return Err(ClientError::from_body(status, &body));
        }

        Ok(response.json::<T>().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_BASE_PATH, path)
    }
}
