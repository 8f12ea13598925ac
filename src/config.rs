use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Number of years (starting with the current one) kept filled with week slots.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
    /// Week slots written per INSERT statement when filling a year.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Run one fill pass before the server starts accepting requests.
    #[serde(default)]
    pub fill_on_startup: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            batch_size: default_batch_size(),
            fill_on_startup: false,
        }
    }
}

fn default_horizon_years() -> u32 {
    5
}

fn default_batch_size() -> usize {
    5
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.calendar.horizon_years > 0,
            "calendar.horizon_years must be > 0, got {}",
            self.calendar.horizon_years
        );
        anyhow::ensure!(
            self.calendar.batch_size > 0,
            "calendar.batch_size must be > 0, got {}",
            self.calendar.batch_size
        );
        Ok(())
    }
}
