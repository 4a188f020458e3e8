use std::env;

use validator::Validate;

use crate::validation::validate_not_blank;

const URL_VARS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const ANON_KEY_VARS: &[&str] = &["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];

/// Connection settings for the hosted auth/data service
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ServiceConfig {
    #[validate(url(message = "Service URL must be an absolute URL"))]
    pub url: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub anon_key: String,
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read the service URL and public API key from the process environment.
    ///
    /// Returns `None` when either value is missing or the pair does not
    /// validate, so callers can render a configuration error instead.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .find(|value| !value.trim().is_empty())
        };

        let (Some(url), Some(anon_key)) = (first_set(URL_VARS), first_set(ANON_KEY_VARS)) else {
            tracing::warn!("Missing Supabase environment variables");
            return None;
        };

        let config = Self::new(url.trim(), anon_key.trim());
        if let Err(errors) = config.validate() {
            tracing::warn!(%errors, "Invalid Supabase configuration");
            return None;
        }

        Some(config)
    }
}

/// Listener address for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8080".to_string()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_with_both_values() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://project.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://project.supabase.co");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn test_from_lookup_falls_back_to_public_names() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://project.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "anon"),
        ]));

        assert!(config.is_some());
    }

    #[test]
    fn test_from_lookup_missing_key_returns_none() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(
            "SUPABASE_URL",
            "https://project.supabase.co",
        )]));

        assert!(config.is_none());
    }

    #[test]
    fn test_from_lookup_blank_value_counts_as_missing() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "   "),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));

        assert!(config.is_none());
    }

    #[test]
    fn test_from_lookup_rejects_relative_url() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "not a url"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));

        assert!(config.is_none());
    }
}
