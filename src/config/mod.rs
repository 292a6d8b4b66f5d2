use anyhow::{Context, Result};
use config::{Config, File};
use indexmap::IndexMap;
use log::{debug, info, warn, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::{MachineRegistry, SensorReading};

fn default_font() -> String {
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub width: u16,
    pub height: u16,
    pub file: String,
    pub polling: u64,
    pub save_to_file: bool,
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            width: 840,
            height: 520,
            file: "dashboard.png".to_string(),
            polling: 3,
            save_to_file: true,
            font: default_font(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            // The stock endpoint is a placeholder, so polling it is opt-in
            enabled: false,
            url: "http://localhost:8000/api/sensors".to_string(),
            timeout: None,
        }
    }
}

impl FeedConfig {
    /// Request timeout in seconds. Defaults to the polling period so a slow
    /// endpoint can never stack requests across ticks.
    pub fn timeout_secs(&self, polling: u64) -> u64 {
        self.timeout.unwrap_or_else(|| polling.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MachinesConfig {
    /// Machine id -> "temperature, vibration, pressure[, humidity]"
    #[serde(default)]
    pub seeds: IndexMap<String, String>,
}

impl Default for MachinesConfig {
    fn default() -> Self {
        let mut seeds = IndexMap::new();
        seeds.insert("Machine1".to_string(), "70.0, 0.1, 1.2, 35.0".to_string());
        seeds.insert("Machine2".to_string(), "24.0, 0.2, 1.3, 40.0".to_string());
        seeds.insert("Machine3".to_string(), "21.0, 0.15, 1.1, 50.0".to_string());
        seeds.insert("Machine4".to_string(), "23.5, 0.05, 1.4, 45.0".to_string());

        Self { seeds }
    }
}

/// Parse a seed string of 3 or 4 comma-separated finite floats.
pub(crate) fn parse_seed(raw: &str) -> Option<SensorReading> {
    let values: Vec<f32> = raw
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    if !(3..=4).contains(&values.len()) || values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    Some(SensorReading::new(
        values[0],
        values[1],
        values[2],
        values.get(3).copied(),
    ))
}

impl MachinesConfig {
    /// Build the startup registry from the seed table, in table order.
    /// Malformed entries are skipped with a warning.
    pub fn seed_registry(&self) -> MachineRegistry {
        let mut registry = MachineRegistry::new();
        for (id, raw) in &self.seeds {
            match parse_seed(raw) {
                Some(reading) => registry.insert(id.clone(), reading),
                None => warn!("Skipping machine {}: invalid seed value {:?}", id, raw),
            }
        }
        registry
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "DASHBOARD")]
    pub dashboard: DashboardConfig,
    #[serde(rename = "FEED", default)]
    pub feed: FeedConfig,
    #[serde(rename = "LOGGING", default)]
    pub logging: LoggingConfig,
    #[serde(rename = "MACHINES", default)]
    pub machines: MachinesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::default(),
            feed: FeedConfig::default(),
            logging: LoggingConfig::default(),
            machines: MachinesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file("config.ini")
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(
                File::with_name(config_path.to_str().unwrap_or(""))
                    .format(config::FileFormat::Ini),
            )
            .build()
            .context(format!(
                "Failed to load config from {}",
                config_path.display()
            ))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        // Build the config string
        let mut config_str = String::new();

        // DASHBOARD section
        config_str.push_str(&format!(
            "[DASHBOARD]\nwidth = {}\nheight = {}\nfile = {}\npolling = {}\nsave_to_file = {}\nfont = {}\n\n",
            self.dashboard.width,
            self.dashboard.height,
            self.dashboard.file,
            self.dashboard.polling,
            self.dashboard.save_to_file,
            self.dashboard.font
        ));

        // FEED section
        config_str.push_str(&format!(
            "[FEED]\nenabled = {}\nurl = {}\n",
            self.feed.enabled, self.feed.url
        ));
        if let Some(timeout) = self.feed.timeout {
            config_str.push_str(&format!("timeout = {}\n", timeout));
        }
        config_str.push('\n');

        // LOGGING section
        config_str.push_str(&format!("[LOGGING]\nlevel = {}\n\n", self.logging.level));

        // MACHINES section
        if !self.machines.seeds.is_empty() {
            config_str.push_str("[MACHINES.seeds]\n");
            for (id, seed) in &self.machines.seeds {
                config_str.push_str(&format!("{} = \"{}\"\n", id, seed));
            }
        }

        fs::write(config_path, config_str).context(format!(
            "Failed to save config to {}",
            config_path.display()
        ))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.dashboard.width, 840);
        assert_eq!(config.dashboard.height, 520);
        assert_eq!(config.dashboard.file, "dashboard.png");
        assert_eq!(config.dashboard.polling, 3);
        assert_eq!(config.dashboard.save_to_file, true);
        assert_eq!(config.feed.enabled, false);
        assert_eq!(config.feed.url, "http://localhost:8000/api/sensors");
        assert_eq!(config.machines.seeds.len(), 4);

        // Seed table keeps insertion order
        let ids: Vec<&String> = config.machines.seeds.keys().collect();
        assert_eq!(ids, ["Machine1", "Machine2", "Machine3", "Machine4"]);
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[DASHBOARD]\nwidth = 800\nheight = 600\nfile = \"test.png\"\npolling = 10\nsave_to_file = true\n\n[FEED]\nenabled = true\nurl = \"http://example.com/api\"\ntimeout = 5\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config_path = temp_file.path();

        let config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(config.dashboard.width, 800);
        assert_eq!(config.dashboard.height, 600);
        assert_eq!(config.dashboard.file, "test.png");
        assert_eq!(config.dashboard.polling, 10);
        assert_eq!(config.dashboard.save_to_file, true);
        assert_eq!(config.feed.enabled, true);
        assert_eq!(config.feed.url, "http://example.com/api");
        assert_eq!(config.feed.timeout, Some(5));
        // Sections left out fall back to defaults
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.machines.seeds.len(), 4);
    }

    #[test]
    fn test_save_config() {
        let mut config = AppConfig::default();
        // Clear the seed map to avoid serialization issues in tests
        config.machines.seeds.clear();

        config.dashboard.width = 1024;
        config.dashboard.height = 768;
        config.dashboard.file = "saved.png".to_string();
        config.dashboard.polling = 5;
        config.feed.enabled = true;
        config.feed.timeout = Some(2);

        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        config.save(config_path).unwrap();

        let loaded_config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(loaded_config.dashboard.width, 1024);
        assert_eq!(loaded_config.dashboard.height, 768);
        assert_eq!(loaded_config.dashboard.file, "saved.png");
        assert_eq!(loaded_config.dashboard.polling, 5);
        assert_eq!(loaded_config.feed.enabled, true);
        assert_eq!(loaded_config.feed.timeout, Some(2));
    }

    #[test]
    fn test_parse_seed() {
        let reading = parse_seed("70.0, 0.1, 1.2, 35.0").unwrap();
        assert_eq!(reading, SensorReading::new(70.0, 0.1, 1.2, Some(35.0)));

        // Humidity is optional
        let reading = parse_seed("24.0,0.2,1.3").unwrap();
        assert_eq!(reading.humidity, None);

        assert!(parse_seed("").is_none());
        assert!(parse_seed("1.0, 2.0").is_none());
        assert!(parse_seed("a, b, c").is_none());
        assert!(parse_seed("1.0, 2.0, 3.0, 4.0, 5.0").is_none());
        // f32 parses "NaN", the registry must not
        assert!(parse_seed("NaN, 0.1, 1.2").is_none());
        assert!(parse_seed("inf, 0.1, 1.2").is_none());
    }

    #[test]
    fn test_seed_registry() {
        let machines = MachinesConfig::default();
        let registry = machines.seed_registry();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.ids(), ["Machine1", "Machine2", "Machine3", "Machine4"]);
        let machine1 = registry.get("Machine1").unwrap();
        assert_eq!(machine1.temperature, 70.0);
        assert_eq!(machine1.humidity, Some(35.0));
    }

    #[test]
    fn test_seed_registry_skips_invalid_entries() {
        let mut machines = MachinesConfig { seeds: IndexMap::new() };
        machines
            .seeds
            .insert("Good".to_string(), "1.0, 2.0, 3.0".to_string());
        machines
            .seeds
            .insert("Bad".to_string(), "not numbers".to_string());

        let registry = machines.seed_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Bad").is_none());
    }

    #[test]
    fn test_timeout_defaults_to_polling() {
        let feed = FeedConfig::default();
        assert_eq!(feed.timeout_secs(3), 3);
        assert_eq!(feed.timeout_secs(0), 1);

        let feed = FeedConfig {
            timeout: Some(7),
            ..FeedConfig::default()
        };
        assert_eq!(feed.timeout_secs(3), 7);
    }
}
