//! Environment-driven configuration for the trading loop.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} is required in live trading mode")]
    MissingForLive(&'static str),
}

/// Get the deployment environment name (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingMode {
    /// Orders go to the configured brokerage.
    Live,
    /// Orders are filled by the in-memory paper broker.
    Paper,
}

impl FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "paper" => Ok(Self::Paper),
            other => Err(format!("unknown trading mode '{}'", other)),
        }
    }
}

/// Instrument class. Selects both the strategy and the order-placement path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Crypto,
    Equity,
    Option,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Equity => "equity",
            AssetClass::Option => "option",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrokerConfig {
    pub base_url: Option<Url>,
    pub credentials: Option<Credentials>,
    /// Opening balance of the paper account.
    pub paper_starting_cash: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataConfig {
    pub base_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    /// Mail relay endpoint. Alerts only go to the log when unset.
    pub relay_url: Option<Url>,
    pub credentials: Option<Credentials>,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradingConfig {
    /// Fraction of buying power allocated per trade.
    pub position_size: f64,
    /// Declared for operators; no strategy or sizer reads it.
    pub stop_loss_pct: f64,
    /// Declared for operators; no strategy or sizer reads it.
    pub take_profit_pct: f64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            position_size: 0.05,
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    pub max_attempts: u32,
    /// Backoff unit: the n-th retry waits `base_delay * 2^n`.
    pub base_delay: Duration,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub poll_interval: Duration,
    pub report_every_ticks: u64,
    pub enable_options: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            report_every_ticks: 10,
            enable_options: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolConfig {
    pub crypto: Vec<String>,
    pub stocks: Vec<String>,
    pub options: Vec<String>,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            crypto: vec!["ETC".to_string()],
            stocks: vec!["SPY".to_string()],
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub mode: TradingMode,
    pub broker: BrokerConfig,
    pub market_data: MarketDataConfig,
    pub notifier: NotifierConfig,
    pub trading: TradingConfig,
    pub execution: ExecutionConfig,
    pub schedule: ScheduleConfig,
    pub symbols: SymbolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            mode: TradingMode::Paper,
            broker: BrokerConfig {
                base_url: None,
                credentials: None,
                paper_starting_cash: 100_000.0,
            },
            market_data: MarketDataConfig { base_url: None },
            notifier: NotifierConfig {
                relay_url: None,
                credentials: None,
                recipient: None,
            },
            trading: TradingConfig::default(),
            execution: ExecutionConfig::default(),
            schedule: ScheduleConfig::default(),
            symbols: SymbolConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let mode = parse_or(&get, "TRADING_MODE", defaults.mode)?;

        let broker_url = parse_opt::<Url, _>(&get, "BROKER_BASE_URL")?;
        let broker = BrokerConfig {
            base_url: broker_url.clone(),
            credentials: credentials(&get, "BROKER_USERNAME", "BROKER_PASSWORD"),
            paper_starting_cash: parse_or(
                &get,
                "PAPER_STARTING_CASH",
                defaults.broker.paper_starting_cash,
            )?,
        };

        let market_data = MarketDataConfig {
            base_url: parse_opt::<Url, _>(&get, "MARKET_DATA_BASE_URL")?.or(broker_url),
        };

        let notifier = NotifierConfig {
            relay_url: parse_opt::<Url, _>(&get, "NOTIFIER_URL")?,
            credentials: credentials(&get, "NOTIFIER_USERNAME", "NOTIFIER_PASSWORD"),
            recipient: get("ALERT_EMAIL"),
        };

        let trading = TradingConfig {
            position_size: parse_or(&get, "POSITION_SIZE", defaults.trading.position_size)?,
            stop_loss_pct: parse_or(&get, "STOP_LOSS_PERCENTAGE", defaults.trading.stop_loss_pct)?,
            take_profit_pct: parse_or(
                &get,
                "TAKE_PROFIT_PERCENTAGE",
                defaults.trading.take_profit_pct,
            )?,
        };
        if !(trading.position_size > 0.0 && trading.position_size <= 1.0) {
            return Err(invalid(
                "POSITION_SIZE",
                trading.position_size,
                "must be in (0, 1]",
            ));
        }

        let max_attempts: u32 = parse_or(&get, "MAX_RETRIES", defaults.execution.max_attempts)?;
        if max_attempts == 0 {
            return Err(invalid("MAX_RETRIES", max_attempts, "must be at least 1"));
        }
        let base_delay_ms: u64 = parse_or(
            &get,
            "RETRY_BASE_DELAY_MS",
            defaults.execution.base_delay.as_millis() as u64,
        )?;

        let interval_secs: u64 = parse_or(
            &get,
            "STREAM_INTERVAL_SECONDS",
            defaults.schedule.poll_interval.as_secs(),
        )?;
        if interval_secs == 0 {
            return Err(invalid("STREAM_INTERVAL_SECONDS", interval_secs, "must be > 0"));
        }
        let report_every_ticks: u64 = parse_or(
            &get,
            "REPORT_EVERY_TICKS",
            defaults.schedule.report_every_ticks,
        )?;
        if report_every_ticks == 0 {
            return Err(invalid("REPORT_EVERY_TICKS", report_every_ticks, "must be > 0"));
        }

        let symbols = SymbolConfig {
            crypto: get("CRYPTO_SYMBOLS")
                .map(|v| split_symbols(&v))
                .unwrap_or(defaults.symbols.crypto),
            stocks: get("STOCK_SYMBOLS")
                .map(|v| split_symbols(&v))
                .unwrap_or(defaults.symbols.stocks),
            options: get("OPTIONS_SYMBOLS")
                .map(|v| split_symbols(&v))
                .unwrap_or(defaults.symbols.options),
        };

        let config = Config {
            environment: get("APP_ENV").unwrap_or(defaults.environment),
            mode,
            broker,
            market_data,
            notifier,
            trading,
            execution: ExecutionConfig {
                max_attempts,
                base_delay: Duration::from_millis(base_delay_ms),
            },
            schedule: ScheduleConfig {
                poll_interval: Duration::from_secs(interval_secs),
                report_every_ticks,
                enable_options: parse_or(&get, "ENABLE_OPTIONS", false)?,
            },
            symbols,
        };

        if config.mode == TradingMode::Live {
            if config.broker.base_url.is_none() {
                return Err(ConfigError::MissingForLive("BROKER_BASE_URL"));
            }
            if config.broker.credentials.is_none() {
                return Err(ConfigError::MissingForLive("BROKER_USERNAME/BROKER_PASSWORD"));
            }
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_opt<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| invalid(key, &raw, &e.to_string())),
        None => Ok(None),
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(get, key)?.unwrap_or(default))
}

fn credentials<G>(get: &G, user_key: &str, pass_key: &str) -> Option<Credentials>
where
    G: Fn(&str) -> Option<String>,
{
    Some(Credentials {
        username: get(user_key)?,
        password: get(pass_key)?,
    })
}

fn split_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
