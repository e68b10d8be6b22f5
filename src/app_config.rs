use anyhow::{anyhow, Context};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// Ask the identity provider's user endpoint about every token.
    Supabase { url: String, anon_key: String },
    /// Verify JWTs locally against the identity provider's JWKS.
    Jwks { url: String, audience: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub dev_bypass: bool,
    /// Origins allowed by CORS. Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        Self::from_vars(|key| env::var(key))
    }

    pub fn from_vars(
        var: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> anyhow::Result<AppConfig> {
        let port = var("PORT")
            .map(|x| x.parse::<u16>())
            .unwrap_or(Ok(3000))
            .context("PORT")?;
        let host = var("HOST").unwrap_or_else(|_| "localhost".to_owned());
        let database_url = var("DATABASE_URL").context("DATABASE_URL")?;
        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .map(|x| x.parse::<u32>())
            .unwrap_or(Ok(5))
            .context("DATABASE_MAX_CONNECTIONS")?;
        let url = var("SUPABASE_URL").context("SUPABASE_URL")?;
        let auth = match var("AUTH_KIND")
            .unwrap_or_else(|_| "SUPABASE".to_owned())
            .as_str()
        {
            "SUPABASE" => {
                let anon_key = var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY")?;
                AuthConfig::Supabase { url, anon_key }
            }
            "JWKS" => AuthConfig::Jwks {
                url,
                audience: var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_owned()),
            },
            _ => Err(anyhow!("Invalid auth kind"))?,
        };
        let dev_bypass = var("AUTH_DEV_BYPASS")
            .map(|v| v == "TRUE")
            .unwrap_or(false);
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(AppConfig {
            host,
            port,
            database_url,
            database_max_connections,
            auth,
            dev_bypass,
            cors_allowed_origins,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_token: String,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<ClientConfig> {
        Self::from_vars(|key| env::var(key))
    }

    pub fn from_vars(
        var: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> anyhow::Result<ClientConfig> {
        Ok(ClientConfig {
            api_base_url: var("API_BASE_URL").context("API_BASE_URL")?,
            api_token: var("API_TOKEN").context("API_TOKEN")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/iron_scribe"),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                host: "localhost".to_string(),
                port: 3000,
                database_url: "postgres://localhost/iron_scribe".to_string(),
                database_max_connections: 5,
                auth: AuthConfig::Supabase {
                    url: "https://example.supabase.co".to_string(),
                    anon_key: "anon".to_string(),
                },
                dev_bypass: false,
                cors_allowed_origins: vec![],
            }
        );
    }

    #[test]
    fn test_app_config_jwks() {
        let config = AppConfig::from_vars(vars(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://db"),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("AUTH_KIND", "JWKS"),
            ("AUTH_DEV_BYPASS", "TRUE"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:8081, https://app.example.com,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.auth,
            AuthConfig::Jwks {
                url: "https://example.supabase.co".to_string(),
                audience: "authenticated".to_string(),
            }
        );
        assert!(config.dev_bypass);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:8081", "https://app.example.com"]
        );
    }

    #[test]
    fn test_app_config_errors_name_the_variable() {
        let err = AppConfig::from_vars(vars(&[("SUPABASE_URL", "x")])).unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_URL");

        let err = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db"),
            ("SUPABASE_URL", "x"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "PORT");

        let err = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db"),
            ("SUPABASE_URL", "x"),
            ("AUTH_KIND", "LDAP"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid auth kind");
    }

    #[test]
    fn test_client_config() {
        let config = ClientConfig::from_vars(vars(&[
            ("API_BASE_URL", "http://10.0.2.2:3000"),
            ("API_TOKEN", "token"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.2.2:3000");
        assert!(ClientConfig::from_vars(vars(&[])).is_err());
    }
}
