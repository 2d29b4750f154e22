//! Text conversion feature: rewrites self-deprecating Japanese text into
//! positive phrasing.
//!
//! Conversion runs through one of two strategies. When `OPENAI_API_KEY` is
//! configured the remote chat-completions path is used and its failures
//! surface to the caller; without a key the deterministic offline fallback
//! serves every request. The endpoint is rate limited per client IP.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/convert` | Site gate only | Rewrite text into positive phrasing |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ConversionService, FallbackService, RemoteConvertService};
