use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
    pub rate_limit: RateLimitConfig,
    pub site_auth: SiteAuthConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// OpenAI chat-completions configuration.
///
/// The presence of `api_key` selects the remote conversion path; without it
/// the service runs on the offline fallback converter.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Gemini image-generation configuration for the share flow.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

/// Optional site-wide HTTP Basic credentials. When both values are set the
/// whole router sits behind the gate; otherwise the site is open.
#[derive(Debug, Clone)]
pub struct SiteAuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            openai: OpenAiConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            site_auth: SiteAuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl OpenAiConfig {
    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        // An empty key counts as unset, same as the swagger credentials
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "OPENAI_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}

impl GeminiConfig {
    const DEFAULT_MODEL: &'static str = "gemini-3-pro-image-preview";
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEMINI_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}

impl RateLimitConfig {
    const DEFAULT_MAX_REQUESTS: u32 = 20;
    const DEFAULT_WINDOW_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUESTS.to_string())
            .parse::<u32>()
            .map_err(|_| "RATE_LIMIT_MAX_REQUESTS must be a valid number".to_string())?;

        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_WINDOW_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RATE_LIMIT_WINDOW_SECS must be a valid number".to_string())?;

        Ok(Self {
            max_requests,
            window_secs,
        })
    }
}

impl SiteAuthConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SITE_BASIC_AUTH_USER").ok().filter(|s| !s.is_empty());
        let password = env::var("SITE_BASIC_AUTH_PASS").ok().filter(|s| !s.is_empty());

        Ok(Self { username, password })
    }

    /// Returns credentials in "username:password" format if the gate is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Kotoba Swap API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for Kotoba Swap".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_auth_credentials_require_both_values() {
        let both = SiteAuthConfig {
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
        };
        assert_eq!(both.credentials(), Some("user:pass".to_string()));

        let only_user = SiteAuthConfig {
            username: Some("user".to_string()),
            password: None,
        };
        assert_eq!(only_user.credentials(), None);

        let neither = SiteAuthConfig {
            username: None,
            password: None,
        };
        assert_eq!(neither.credentials(), None);
    }
}
