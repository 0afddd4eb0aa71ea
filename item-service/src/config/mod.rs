use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ItemConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Upper bound on a single point lookup against the store.
    pub timeout_ms: u64,
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ItemConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let timeout_ms = get_env("LOOKUP_TIMEOUT_MS", Some("5000"), is_prod)?
            .parse::<u64>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid LOOKUP_TIMEOUT_MS: {}", e))
            })?;

        Ok(ItemConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("test"), is_prod)?,
                collection: get_env("MONGODB_COLLECTION", Some("items"), is_prod)?,
            },
            lookup: LookupConfig { timeout_ms },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env("ITEM_SERVICE_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let result = get_env("ITEM_SERVICE_TEST_UNSET_KEY", Some("fallback"), true);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let result = get_env("ITEM_SERVICE_TEST_UNSET_KEY", None, false);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn lookup_timeout_is_in_milliseconds() {
        let lookup = LookupConfig { timeout_ms: 250 };
        assert_eq!(lookup.timeout(), Duration::from_millis(250));
    }
}
