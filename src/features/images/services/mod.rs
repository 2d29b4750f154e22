mod image_service;

pub use image_service::{ImagePayload, ImageService};
