/*
 * Responsibility
 * - Read settings from the environment (SUPABASE_URL, SUPABASE_ANON_KEY, DATABASE_URL, ...)
 * - Validate values up front (startup fails on invalid input)
 * - Decide which identity / store backend the process wires up
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How callers are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityBackend {
    /// Ask the Supabase auth server (`/auth/v1/user`) for every request.
    SupabaseAuth,
    /// Verify HS256 access tokens locally with the project's JWT secret.
    Jwt { secret: String, audience: String },
}

/// Where journal entries live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgREST gateway under `{SUPABASE_URL}/rest/v1`.
    Postgrest,
    /// Direct Postgres connection, scoped per request to the caller's role and claims.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Both default to "" when unset; collaborator calls then fail downstream.
    pub supabase_url: String,
    pub supabase_anon_key: String,

    pub journal_table: String,

    pub identity: IdentityBackend,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let supabase_url = lookup("SUPABASE_URL")
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();
        let supabase_anon_key = lookup("SUPABASE_ANON_KEY").unwrap_or_default();

        let journal_table =
            lookup("JOURNAL_TABLE").unwrap_or_else(|| "journal_entries".to_string());
        if !is_identifier(&journal_table) {
            return Err(ConfigError::Invalid("JOURNAL_TABLE"));
        }

        let identity = match lookup("SUPABASE_JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => IdentityBackend::Jwt {
                secret,
                audience: lookup("SUPABASE_JWT_AUDIENCE")
                    .unwrap_or_else(|| "authenticated".to_string()),
            },
            None => IdentityBackend::SupabaseAuth,
        };

        let store = match lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(database_url) => {
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(s) => s
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
                    None => 5,
                };
                StoreBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            None => StoreBackend::Postgrest,
        };

        Ok(Self {
            addr,
            app_env,
            supabase_url,
            supabase_anon_key,
            journal_table,
            identity,
            store,
        })
    }
}

// Table names are interpolated into SQL and URLs, so only plain identifiers are accepted.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
