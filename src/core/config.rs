use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Remote document store (Firestore REST API) configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the document store REST API
    pub base_url: String,
    /// Project that owns the record collections
    pub project_id: String,
    /// Database within the project
    pub database_id: String,
    /// Web API key sent with every request
    pub api_key: String,
    /// Page size for the single full-collection read
    pub page_size: u32,
}

/// Identity provider (Identity Toolkit REST API) configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity provider REST API
    pub base_url: String,
    /// Web API key sent with every request
    pub api_key: String,
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
            store: StoreConfig::from_env()?,
            identity: IdentityConfig::from_env()?,
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

impl StoreConfig {
    const DEFAULT_BASE_URL: &'static str = "https://firestore.googleapis.com/v1";
    const DEFAULT_DATABASE_ID: &'static str = "(default)";
    // Collections are loaded in one request; this must stay above the largest
    // collection the business keeps.
    const DEFAULT_PAGE_SIZE: u32 = 1000;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("FIRESTORE_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let project_id = env::var("FIRESTORE_PROJECT_ID")
            .map_err(|_| "FIRESTORE_PROJECT_ID environment variable is required".to_string())?;

        let database_id = env::var("FIRESTORE_DATABASE_ID")
            .unwrap_or_else(|_| Self::DEFAULT_DATABASE_ID.to_string());

        let api_key = env::var("FIREBASE_API_KEY")
            .map_err(|_| "FIREBASE_API_KEY environment variable is required".to_string())?;

        let page_size = env::var("FIRESTORE_PAGE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "FIRESTORE_PAGE_SIZE must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            project_id,
            database_id,
            api_key,
            page_size,
        })
    }

    /// Root URL for document reads in the configured database
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database_id
        )
    }
}

impl IdentityConfig {
    const DEFAULT_BASE_URL: &'static str = "https://identitytoolkit.googleapis.com/v1";

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("IDENTITY_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let api_key = env::var("FIREBASE_API_KEY")
            .map_err(|_| "FIREBASE_API_KEY environment variable is required".to_string())?;

        Ok(Self { base_url, api_key })
    }
}
