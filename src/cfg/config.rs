// src/cfg/config.rs

//! Layered YAML settings.
//!
//! [`load_config`] reads `{config_dir}/default.yaml` (required), merges
//! `{config_dir}/{env}.yaml` over it (two-level shallow merge: an overlay
//! section replaces keys inside the matching default section, any other
//! overlay value replaces wholesale), applies environment-variable
//! overrides, then resolves string policy fields into typed values.
//!
//! [`load_config`]: self::load_config

use std::env;
use std::fs;
use std::path::Path;

use ::serde::Deserialize;
use ::serde_yaml::Value;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{AppError, AppResult};
use crate::logging::retention::parse_retention_days;
use crate::logging::rotation::{parse_rotation_policy, RotationPolicy};

/// environment variable overriding `telegram.bot_token`
pub const ENV_TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// environment variable overriding `telegram.chat_id`
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// `app:` section.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            name: String::from("rapt"),
            version: String::from(env!("CARGO_PKG_VERSION")),
            debug: false,
        }
    }
}

/// `logging:` section.
///
/// `rotation` and `retention` hold the YAML strings as authored;
/// `rotation_policy` and `retention_days` are their parsed forms, filled by
/// [`Settings::resolve`] so the strings are interpreted exactly once.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// rotation specification; `"00:00"` or `"100 MB"`
    pub rotation: String,
    /// retention age specification; `"10 days"` or `"2 weeks"`
    pub retention: String,
    #[serde(skip)]
    pub rotation_policy: RotationPolicy,
    #[serde(skip)]
    pub retention_days: u32,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        let rotation = String::from("00:00");
        let retention = String::from("10 days");
        let rotation_policy = parse_rotation_policy(&rotation);
        let retention_days = parse_retention_days(&retention);

        LoggingConfig {
            level: String::from("INFO"),
            rotation,
            retention,
            rotation_policy,
            retention_days,
        }
    }
}

/// `telegram:` section.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelegramConfig {
    pub enabled: bool,
    pub bot_token: String,
    pub chat_id: String,
}

/// `api:` section.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> ApiConfig {
        ApiConfig {
            host: String::from("127.0.0.1"),
            port: 8000,
        }
    }
}

/// `http:` section.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> HttpConfig {
        HttpConfig {
            base_url: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// All settings, one object threaded through the program explicitly.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub telegram: TelegramConfig,
    pub api: ApiConfig,
    pub http: HttpConfig,
}

impl Settings {
    /// Parse string policy fields into their typed forms.
    ///
    /// Both parsers are permissive; an unreadable specification becomes the
    /// documented default (midnight rotation, 10-day retention) rather than
    /// an error.
    pub fn resolve(&mut self) {
        self.logging.rotation_policy = parse_rotation_policy(&self.logging.rotation);
        self.logging.retention_days = parse_retention_days(&self.logging.retention);
    }
}

/// Two-level shallow merge of `overlay` into `base`.
///
/// A top-level mapping in `overlay` updates keys inside the matching
/// `base` mapping; any other overlay value replaces the base value
/// wholesale. Nesting deeper than two levels is replaced, not merged.
fn merge_yaml(
    base: &mut Value,
    overlay: Value,
) {
    let base_map = match base.as_mapping_mut() {
        Some(val) => val,
        None => {
            *base = overlay;
            return;
        }
    };
    let overlay_map = match overlay {
        Value::Mapping(val) => val,
        _ => return,
    };
    for (key, value) in overlay_map {
        let merged_in_place = match (base_map.get_mut(&key), value.as_mapping()) {
            (Some(Value::Mapping(base_section)), Some(overlay_section)) => {
                for (k2, v2) in overlay_section.iter() {
                    base_section.insert(k2.clone(), v2.clone());
                }
                true
            }
            _ => false,
        };
        if !merged_in_place {
            base_map.insert(key, value);
        }
    }
}

fn read_yaml(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path).map_err(|err| {
        AppError::Configuration(format!("cannot read {}: {}", path.display(), err))
    })?;
    let value: Value = serde_yaml::from_str(&text).map_err(|err| {
        AppError::Configuration(format!("invalid YAML in {}: {}", path.display(), err))
    })?;
    // an empty file parses as null; treat as an empty mapping
    match value {
        Value::Null => Ok(Value::Mapping(Default::default())),
        val => Ok(val),
    }
}

fn set_nested(
    root: &mut Value,
    section: &str,
    key: &str,
    value: String,
) {
    let root_map = match root.as_mapping_mut() {
        Some(val) => val,
        None => return,
    };
    let section_key = Value::from(section);
    if !root_map.contains_key(&section_key) {
        root_map.insert(section_key.clone(), Value::Mapping(Default::default()));
    }
    if let Some(section_map) = root_map
        .get_mut(&section_key)
        .and_then(Value::as_mapping_mut)
    {
        section_map.insert(Value::from(key), Value::from(value));
    }
}

/// Load settings for environment `env` from `config_dir`.
///
/// `default.yaml` is required; `{env}.yaml` is optional. After merging,
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` environment variables
/// override the corresponding `telegram:` keys (secrets stay out of
/// committed files).
pub fn load_config(
    env_name: &str,
    config_dir: &Path,
) -> AppResult<Settings> {
    defn!("({:?}, {:?})", env_name, config_dir);
    let default_file = config_dir.join("default.yaml");
    if !default_file.exists() {
        defx!("no default config");
        return Err(AppError::Configuration(format!(
            "default config not found: {}",
            default_file.display(),
        )));
    }
    let mut merged = read_yaml(&default_file)?;

    let env_file = config_dir.join(format!("{}.yaml", env_name));
    if env_file.exists() {
        defo!("overlay {:?}", env_file);
        let overlay = read_yaml(&env_file)?;
        merge_yaml(&mut merged, overlay);
    }

    if let Ok(bot_token) = env::var(ENV_TELEGRAM_BOT_TOKEN) {
        defo!("override telegram.bot_token from environment");
        set_nested(&mut merged, "telegram", "bot_token", bot_token);
    }
    if let Ok(chat_id) = env::var(ENV_TELEGRAM_CHAT_ID) {
        defo!("override telegram.chat_id from environment");
        set_nested(&mut merged, "telegram", "chat_id", chat_id);
    }

    let mut settings: Settings = serde_yaml::from_value(merged).map_err(|err| {
        AppError::Configuration(format!("invalid configuration: {}", err))
    })?;
    settings.resolve();
    defx!("{:?}", settings.app);

    Ok(settings)
}
