use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub roster_path: PathBuf,
    /// Local directory the asset source reads from when no base URL is set.
    pub asset_dir: PathBuf,
    /// When set, assets are fetched over HTTP from this origin instead.
    pub asset_base_url: Option<String>,
    pub asset_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let roster_path = base_dir.join(
            std::env::var("ROSTER_PATH").unwrap_or_else(|_| "data/students.json".to_string()),
        );
        let asset_dir =
            base_dir.join(std::env::var("ASSET_DIR").unwrap_or_else(|_| "assets".to_string()));

        let asset_base_url = std::env::var("ASSET_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let asset_timeout = Duration::from_secs(
            std::env::var("ASSET_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        );

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        Ok(Self {
            roster_path,
            asset_dir,
            asset_base_url,
            asset_timeout,
            host,
            port,
        })
    }
}
