mod conversion_service;
mod fallback_service;
mod remote_service;

pub use conversion_service::ConversionService;
pub use fallback_service::FallbackService;
pub use remote_service::{RemoteConvertService, RemoteError};
