use crate::error::{Result, SapcastError};
use crate::logic::RatingThresholds;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LATITUDE_LIMIT: f64 = 90.0;
pub const LONGITUDE_LIMIT: f64 = 180.0;

/// Parse one coordinate, rejecting non-finite values and anything beyond `±limit`
pub fn parse_coordinate(raw: &str, name: &str, limit: f64) -> std::result::Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(format!(
            "{} must be a number between -{} and {}",
            name, limit, limit
        )),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub location: LocationConfig,
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub thresholds: RatingThresholds,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl OpenWeatherMapConfig {
    /// Enabled with a key that is neither blank nor an unresolved `${VAR}`
    pub fn is_usable(&self) -> bool {
        let key = self.api_key.trim();
        self.enabled && !key.is_empty() && !key.starts_with("${")
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_hours: u32,
    /// Decimal places kept in the coordinate cache key
    pub coordinate_precision: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 3,
            coordinate_precision: 2,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.ttl_hours as i64)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".into(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SapcastError::Config(format!(
                "Config file not found at {:?}. Run `sapcast init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SapcastError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SapcastError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let loc = &self.location;
        if !(loc.latitude.abs() <= LATITUDE_LIMIT && loc.longitude.abs() <= LONGITUDE_LIMIT) {
            return Err(SapcastError::Config(format!(
                "Location coordinates out of range: {}, {}",
                loc.latitude, loc.longitude
            )));
        }

        let t = &self.thresholds;
        if t.ideal_low_min > t.ideal_low_max || t.ideal_high_min > t.ideal_high_max {
            return Err(SapcastError::Config(
                "Threshold ranges must have min <= max".into(),
            ));
        }

        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sapcast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/sapcast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SapcastError::Config("Cannot determine config directory".into()))?
            .join("sapcast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up sapcast!");
        println!();

        println!("Sugarbush Location");
        let name: String = Input::new()
            .with_prompt("  Name")
            .default("Sugarbush".into())
            .interact_text()
            .map_err(|e| SapcastError::Config(format!("Input error: {}", e)))?;

        let latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(44.26)
            .validate_with(|v: &f64| {
                if (-90.0..=90.0).contains(v) {
                    Ok(())
                } else {
                    Err("latitude must be between -90 and 90")
                }
            })
            .interact_text()
            .map_err(|e| SapcastError::Config(format!("Input error: {}", e)))?;

        let longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(-72.58)
            .validate_with(|v: &f64| {
                if (-180.0..=180.0).contains(v) {
                    Ok(())
                } else {
                    Err("longitude must be between -180 and 180")
                }
            })
            .interact_text()
            .map_err(|e| SapcastError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("OpenWeatherMap One Call (leave blank to use ${{OPENWEATHERMAP_API_KEY}})");
        let api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SapcastError::Config(format!("Input error: {}", e)))?;

        let api_key = if api_key.is_empty() {
            "${OPENWEATHERMAP_API_KEY}".to_string()
        } else {
            api_key
        };

        println!();

        let config = Config {
            location: LocationConfig {
                name,
                latitude,
                longitude,
            },
            openweathermap: OpenWeatherMapConfig {
                api_key,
                enabled: true,
            },
            thresholds: RatingThresholds::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SapcastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# sapcast configuration\n# Generated by `sapcast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        // Re-read so placeholders resolve the same way as a normal load
        let config = Self::load(Some(config_path.clone()))?;
        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("SAPCAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SapcastError::Config("Cannot determine data directory".into()))?
            .join("sapcast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("sapcast.db"))
    }

    pub fn log_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("sapcast.log"))
    }
}
