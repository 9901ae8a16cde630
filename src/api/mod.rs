//! REST API Bindings
//!
//! Typed wrappers around the backend endpoints, organized by domain.
//! Every request carries the stored bearer token; a 401 clears it and
//! fires the client's `on_unauthorized` callback.

mod error;
mod auth;
mod content;
mod category;
mod upload;
mod backup;
mod users;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session;

pub use error::*;
pub use upload::*;
pub use backup::*;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    on_unauthorized: Option<Callback<()>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            on_unauthorized: None,
        }
    }

    /// Run `callback` whenever a request comes back 401
    pub fn with_unauthorized_handler(mut self, callback: Callback<()>) -> Self {
        self.on_unauthorized = Some(callback);
        self
    }

    /// Same client, but a 401 only clears the token. Used by the startup
    /// session check, where an expired token is not an error worth a prompt.
    pub fn without_unauthorized_handler(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            on_unauthorized: None,
        }
    }

    pub fn notifies_unauthorized(&self) -> bool {
        self.on_unauthorized.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match session::bearer() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// Map non-2xx responses to `ApiError`.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if status == 401 {
            log::warn!("[API] 401 from {}", response.url());
            session::clear_token();
            if let Some(callback) = self.on_unauthorized {
                callback.run(());
            }
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let response = request.send().await?;
        self.check(response).await
    }

    async fn send_builder(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        self.check(response).await
    }

    // ========================
    // Verbs
    // ========================

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = Self::authorize(Request::get(&self.url(path)));
        let response = self.send_builder(builder).await?;
        Ok(response.json::<T>().await?)
    }

    /// GET returning the raw response (binary downloads)
    pub async fn get_raw(&self, path: &str) -> Result<Response, ApiError> {
        let builder = Self::authorize(Request::get(&self.url(path)));
        self.send_builder(builder).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = Self::authorize(Request::post(&self.url(path))).json(body)?;
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = Self::authorize(Request::put(&self.url(path))).json(body)?;
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST whose response body is ignored
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = Self::authorize(Request::post(&self.url(path))).json(body)?;
        self.send(request).await?;
        Ok(())
    }

    /// PUT whose response body is ignored
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = Self::authorize(Request::put(&self.url(path))).json(body)?;
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = Self::authorize(Request::delete(&self.url(path)));
        self.send_builder(builder).await?;
        Ok(())
    }

    /// Multipart POST; the browser sets the boundary header.
    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: web_sys::FormData) -> Result<T, ApiError> {
        let request = Self::authorize(Request::post(&self.url(path))).body(form)?;
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Single-field multipart body
pub fn file_form(field: &str, file: &web_sys::File) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    form.append_with_blob_and_filename(field, file, &file.name())
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_client_keeps_base_and_drops_handler() {
        let client = ApiClient::new("/api").with_unauthorized_handler(Callback::new(|_| {}));
        assert!(client.notifies_unauthorized());

        let quiet = client.without_unauthorized_handler();
        assert!(!quiet.notifies_unauthorized());
        assert_eq!(quiet.url("/auth/me"), "/api/auth/me");
        assert!(client.notifies_unauthorized());
    }
}
