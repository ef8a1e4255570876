use crate::error::{Result, StoreError};
use crate::query::{DEFAULT_PRICE_CEILING, NEW_ARRIVALS_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ORDER_PHONE: &str = "918838286823";

pub const ENV_CLOUD_NAME: &str = "STOREFRONT_CLOUD_NAME";
pub const ENV_UPLOAD_PRESET: &str = "STOREFRONT_UPLOAD_PRESET";
pub const ENV_API_KEY: &str = "STOREFRONT_API_KEY";

/// Credentials for the image hosting service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageHostConfig {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub upload_preset: String,
    #[serde(default)]
    pub api_key: String,
}

/// Configuration, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Default upper bound of the price filter
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// How many products the new arrivals strip shows
    #[serde(default = "default_new_arrivals_limit")]
    pub new_arrivals_limit: usize,

    /// Phone number orders are handed off to, international format without '+'
    #[serde(default = "default_order_phone")]
    pub order_phone: String,

    #[serde(default)]
    pub image_host: Option<ImageHostConfig>,
}

fn default_price_ceiling() -> f64 {
    DEFAULT_PRICE_CEILING
}

fn default_new_arrivals_limit() -> usize {
    NEW_ARRIVALS_LIMIT
}

fn default_order_phone() -> String {
    DEFAULT_ORDER_PHONE.to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            price_ceiling: DEFAULT_PRICE_CEILING,
            new_arrivals_limit: NEW_ARRIVALS_LIMIT,
            order_phone: DEFAULT_ORDER_PHONE.to_string(),
            image_host: None,
        }
    }
}

/// Keys accepted by `config get/set`.
pub const CONFIG_KEYS: &[&str] = &[
    "price-ceiling",
    "new-arrivals-limit",
    "order-phone",
    "cloud-name",
    "upload-preset",
    "api-key",
];

impl StorefrontConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StoreError::Io)?;
        let config: StorefrontConfig =
            serde_json::from_str(&content).map_err(StoreError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StoreError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StoreError::Serialization)?;
        fs::write(config_path, content).map_err(StoreError::Io)?;
        Ok(())
    }

    /// Overlay image host settings from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cloud_name = lookup(ENV_CLOUD_NAME);
        let upload_preset = lookup(ENV_UPLOAD_PRESET);
        let api_key = lookup(ENV_API_KEY);

        if cloud_name.is_none() && upload_preset.is_none() && api_key.is_none() {
            return self;
        }

        let mut host = self.image_host.take().unwrap_or_default();
        if let Some(v) = cloud_name {
            host.cloud_name = v;
        }
        if let Some(v) = upload_preset {
            host.upload_preset = v;
        }
        if let Some(v) = api_key {
            host.api_key = v;
        }
        self.image_host = Some(host);
        self
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let host = self.image_host.clone().unwrap_or_default();
        let value = match key {
            "price-ceiling" => self.price_ceiling.to_string(),
            "new-arrivals-limit" => self.new_arrivals_limit.to_string(),
            "order-phone" => self.order_phone.clone(),
            "cloud-name" => host.cloud_name,
            "upload-preset" => host.upload_preset,
            "api-key" => host.api_key,
            other => return Err(StoreError::Config(format!("Unknown config key: {}", other))),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "price-ceiling" => {
                let ceiling: f64 = value
                    .parse()
                    .map_err(|_| StoreError::Config(format!("Not a number: {}", value)))?;
                if !ceiling.is_finite() || ceiling < 0.0 {
                    return Err(StoreError::Config(format!(
                        "Price ceiling must be a non-negative number: {}",
                        value
                    )));
                }
                self.price_ceiling = ceiling;
            }
            "new-arrivals-limit" => {
                self.new_arrivals_limit = value
                    .parse()
                    .map_err(|_| StoreError::Config(format!("Not a count: {}", value)))?;
            }
            "order-phone" => {
                self.order_phone = value.trim_start_matches('+').to_string();
            }
            "cloud-name" => {
                self.image_host.get_or_insert_with(Default::default).cloud_name = value.to_string();
            }
            "upload-preset" => {
                self.image_host.get_or_insert_with(Default::default).upload_preset =
                    value.to_string();
            }
            "api-key" => {
                self.image_host.get_or_insert_with(Default::default).api_key = value.to_string();
            }
            other => return Err(StoreError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
