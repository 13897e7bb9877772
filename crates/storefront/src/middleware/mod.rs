//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture panics and errors, one transaction per request)
//! 2. `TraceLayer` (request span with method, path and `request_id`)
//! 3. Request ID (reuse or generate `x-request-id`)
//! 4. Security headers (CSP, framing, isolation)

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
