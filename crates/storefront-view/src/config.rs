//! # View Configuration
//!
//! Tunables for the storefront sections: carousel cadence and window sizes,
//! store price bounds, detail caching and currency display.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_BANNER_INTERVAL_MS=8000                                 │
//! │     STOREFRONT_GRID_WINDOW=3                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 s banner, 4-wide grids, ₹0 - ₹10,000 store range                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [banner]
//! mode = "wrap"
//! window_size = 1
//! auto_advance = true
//! interval_ms = 5000
//!
//! [grid]
//! mode = "slide_window"
//! window_size = 4
//! auto_advance = false
//!
//! [store]
//! price_min = 0
//! price_max = 10000
//! page_size = 8
//!
//! [detail]
//! cache_enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use storefront_core::filter::{FilterCriteria, PriceRange};
use storefront_core::money::{Currency, Money};
use storefront_core::pager::WindowMode;
use storefront_core::validation::{
    validate_currency_decimals, validate_interval_ms, validate_window_size,
};
use storefront_core::DEFAULT_GRID_WINDOW;

use crate::error::{ViewError, ViewResult};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Carousel Settings
// =============================================================================

/// Settings for one carousel (the banner or a product grid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSettings {
    /// How the carousel moves past the end.
    #[serde(default)]
    pub mode: WindowMode,

    /// Items visible at once.
    #[serde(default = "default_banner_window")]
    pub window_size: usize,

    /// Whether the timer starts enabled.
    #[serde(default)]
    pub auto_advance: bool,

    /// Auto-advance period (milliseconds).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_banner_window() -> usize {
    1
}

fn default_interval_ms() -> u64 {
    5000
}

impl CarouselSettings {
    /// Hero banner: one slide, wrapping, advancing every 5 seconds.
    pub fn banner() -> Self {
        CarouselSettings {
            mode: WindowMode::Wrap,
            window_size: default_banner_window(),
            auto_advance: true,
            interval_ms: default_interval_ms(),
        }
    }

    /// Top products / new arrivals: four cards, sliding, manual only.
    pub fn grid() -> Self {
        CarouselSettings {
            mode: WindowMode::SlideWindow,
            window_size: DEFAULT_GRID_WINDOW,
            auto_advance: false,
            interval_ms: default_interval_ms(),
        }
    }

    /// Auto-advance period as a Duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    fn validate(&self, section: &str) -> ViewResult<()> {
        validate_window_size(self.window_size)
            .map_err(|e| ViewError::InvalidConfig(format!("[{}] {}", section, e)))?;
        validate_interval_ms("interval_ms", self.interval_ms)
            .map_err(|e| ViewError::InvalidConfig(format!("[{}] {}", section, e)))?;
        Ok(())
    }
}

fn default_banner() -> CarouselSettings {
    CarouselSettings::banner()
}

fn default_grid() -> CarouselSettings {
    CarouselSettings::grid()
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store page defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Lower bound of the initial price range (minor units).
    #[serde(default)]
    pub price_min: i64,

    /// Upper bound of the initial price range (minor units).
    #[serde(default = "default_price_max")]
    pub price_max: i64,

    /// Cards visible at once on the store grid.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether the store starts with out-of-stock items hidden.
    #[serde(default)]
    pub hide_out_of_stock: bool,
}

fn default_price_max() -> i64 {
    10_000
}

fn default_page_size() -> usize {
    8
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            price_min: 0,
            price_max: default_price_max(),
            page_size: default_page_size(),
            hide_out_of_stock: false,
        }
    }
}

impl StoreSettings {
    /// Criteria a freshly mounted store page starts with.
    pub fn default_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::with_price_range(PriceRange::new(
            Money::from_minor(self.price_min),
            Money::from_minor(self.price_max),
        ));
        criteria.set_hide_out_of_stock(self.hide_out_of_stock);
        criteria
    }
}

// =============================================================================
// Detail Settings
// =============================================================================

/// Detail loader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSettings {
    /// Keep fetched full records so reopening a post skips the fetch.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DetailSettings {
    fn default() -> Self {
        DetailSettings {
            cache_enabled: true,
        }
    }
}

// =============================================================================
// Main View Configuration
// =============================================================================

/// Complete view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Hero banner carousel.
    #[serde(default = "default_banner")]
    pub banner: CarouselSettings,

    /// Top products / new arrivals carousels.
    #[serde(default = "default_grid")]
    pub grid: CarouselSettings,

    /// Store page defaults.
    #[serde(default)]
    pub store: StoreSettings,

    /// Detail loader settings.
    #[serde(default)]
    pub detail: DetailSettings,

    /// Price display.
    #[serde(default)]
    pub currency: Currency,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            banner: CarouselSettings::banner(),
            grid: CarouselSettings::grid(),
            store: StoreSettings::default(),
            detail: DetailSettings::default(),
            currency: Currency::default(),
        }
    }
}

impl ViewConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ViewResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading view config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load view config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ViewResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ViewError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "View config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ViewResult<()> {
        self.banner.validate("banner")?;
        self.grid.validate("grid")?;

        validate_window_size(self.store.page_size)
            .map_err(|e| ViewError::InvalidConfig(format!("[store] {}", e)))?;

        if self.store.price_min < 0 {
            return Err(ViewError::InvalidConfig(
                "[store] price_min must not be negative".into(),
            ));
        }

        if self.store.price_min > self.store.price_max {
            return Err(ViewError::InvalidConfig(format!(
                "[store] price_min ({}) is above price_max ({})",
                self.store.price_min, self.store.price_max
            )));
        }

        validate_currency_decimals(self.currency.decimals)
            .map_err(|e| ViewError::InvalidConfig(format!("[currency] {}", e)))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("STOREFRONT_BANNER_INTERVAL_MS") {
            match value.parse::<u64>() {
                Ok(ms) => {
                    debug!(interval_ms = ms, "Overriding banner interval from environment");
                    self.banner.interval_ms = ms;
                }
                Err(_) => warn!(value = %value, "Invalid STOREFRONT_BANNER_INTERVAL_MS"),
            }
        }

        if let Ok(value) = std::env::var("STOREFRONT_AUTO_ADVANCE") {
            if let Some(enabled) = parse_flag(&value) {
                debug!(enabled, "Overriding banner auto-advance from environment");
                self.banner.auto_advance = enabled;
            }
        }

        if let Ok(value) = std::env::var("STOREFRONT_GRID_WINDOW") {
            if let Ok(size) = value.parse::<usize>() {
                debug!(window_size = size, "Overriding grid window from environment");
                self.grid.window_size = size;
            }
        }

        if let Ok(value) = std::env::var("STOREFRONT_PRICE_MAX") {
            if let Ok(max) = value.parse::<i64>() {
                self.store.price_max = max;
            }
        }

        if let Ok(value) = std::env::var("STOREFRONT_DETAIL_CACHE") {
            if let Some(enabled) = parse_flag(&value) {
                self.detail.cache_enabled = enabled;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.banner.mode, WindowMode::Wrap);
        assert_eq!(config.banner.window_size, 1);
        assert!(config.banner.auto_advance);
        assert_eq!(config.banner.interval(), Duration::from_secs(5));
        assert_eq!(config.grid.mode, WindowMode::SlideWindow);
        assert_eq!(config.grid.window_size, 4);
        assert!(!config.grid.auto_advance);
        assert_eq!(config.store.price_max, 10_000);
        assert!(config.detail.cache_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ViewConfig::default();

        config.grid.window_size = 0;
        assert!(config.validate().is_err());

        config.grid.window_size = 4;
        config.banner.interval_ms = 0;
        assert!(config.validate().is_err());

        config.banner.interval_ms = 5000;
        config.store.price_min = 20_000;
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_currency_decimals_bounded() {
        let config: ViewConfig = toml::from_str(
            r#"
            [currency]
            symbol = "$"
            decimals = 20
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("[currency]"));

        let mut config = ViewConfig::default();
        config.currency.decimals = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ViewConfig = toml::from_str(
            r#"
            [grid]
            mode = "slide_window"
            window_size = 3

            [store]
            price_max = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.window_size, 3);
        assert_eq!(config.grid.interval_ms, 5000);
        assert_eq!(config.banner, CarouselSettings::banner());
        assert_eq!(config.store.price_max, 5000);
        assert_eq!(config.store.page_size, 8);
        assert_eq!(config.currency.symbol, "₹");
    }

    #[test]
    fn test_toml_serialization() {
        let config = ViewConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[banner]"));
        assert!(toml_str.contains("[grid]"));
        assert!(toml_str.contains("slide_window"));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-test-{}.toml",
            std::process::id()
        ));

        let mut config = ViewConfig::default();
        config.store.page_size = 12;
        config.save(Some(path.clone())).unwrap();

        let loaded = ViewConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.store.page_size, 12);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_store_default_criteria() {
        let criteria = StoreSettings::default().default_criteria();
        assert_eq!(criteria.price_range().max, Money::from_minor(10_000));
        assert!(!criteria.hide_out_of_stock());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
