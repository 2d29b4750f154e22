//! Share-image generation for the before/after flow.
//!
//! Wraps the Gemini `generateContent` API: the handler takes the original
//! and rewritten text and returns a base64-encoded 9:16 illustration for
//! social sharing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/generate-image` | Site gate only | Generate a share image |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ImageService;
