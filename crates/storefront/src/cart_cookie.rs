//! Cookie-backed cart storage.
//!
//! The visitor's cart lives in their browser as a single cookie named
//! [`CART_COOKIE_NAME`] holding the percent-encoded JSON cart, e.g.
//! `cart=%7B%221%22%3A2%7D` for `{"1":2}`. The server keeps no cart state.
//!
//! [`CookieCartStorage`] is extracted per request: reads come from the request
//! `Cookie` header, and a write queues a `Set-Cookie` header that
//! [`CookieCartStorage::apply`] attaches to the response.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};
use cookie::{Cookie, SameSite, time::Duration};
use modern_shop_core::cart::{CART_STORAGE_KEY, CartStorage, StorageError};

use crate::config::CartCookieConfig;
use crate::state::AppState;

/// Name of the cart cookie.
pub const CART_COOKIE_NAME: &str = CART_STORAGE_KEY;

/// Largest `Set-Cookie` value browsers are guaranteed to keep.
pub const MAX_COOKIE_BYTES: usize = 4096;

/// Cart slot backed by the request/response cookie pair.
#[derive(Debug, Clone)]
pub struct CookieCartStorage {
    incoming: Option<String>,
    pending: Option<HeaderValue>,
    settings: CartCookieConfig,
}

impl CookieCartStorage {
    /// Read the cart cookie from request headers.
    ///
    /// Cookie pairs that fail to parse are skipped; if the cart cookie itself
    /// is unreadable the slot is treated as empty.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, settings: &CartCookieConfig) -> Self {
        let incoming = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse_encoded)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == CART_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string());

        Self {
            incoming,
            pending: None,
            settings: settings.clone(),
        }
    }

    /// The `Set-Cookie` value queued by the last write, if any.
    #[must_use]
    pub const fn pending_set_cookie(&self) -> Option<&HeaderValue> {
        self.pending.as_ref()
    }

    /// Attach the queued `Set-Cookie` header (if any) to `response`.
    pub fn apply(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if let Some(value) = &self.pending {
            response.headers_mut().append(SET_COOKIE, value.clone());
        }
        response
    }

    fn build_cookie(&self, value: &str) -> Cookie<'static> {
        Cookie::build((CART_COOKIE_NAME, value.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .max_age(Duration::days(self.settings.max_age_days))
            .build()
    }
}

impl CartStorage for CookieCartStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.incoming.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        let header = self.build_cookie(value).encoded().to_string();
        if header.len() > MAX_COOKIE_BYTES {
            return Err(StorageError::TooLarge {
                len: header.len(),
                limit: MAX_COOKIE_BYTES,
            });
        }

        let header =
            HeaderValue::from_str(&header).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        self.pending = Some(header);
        self.incoming = Some(value.to_string());
        Ok(())
    }
}

impl FromRequestParts<AppState> for CookieCartStorage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(
            &parts.headers,
            &state.config().cart_cookie,
        ))
    }
}
