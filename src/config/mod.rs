use std::path::PathBuf;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub pages_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub quotes_db: PathBuf,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            templates_dir: PathBuf::from("templates"),
            quotes_db: PathBuf::from("quotes.db"),
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        pages_dir: PathBuf,
        templates_dir: PathBuf,
        quotes_db: PathBuf,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            pages_dir,
            templates_dir,
            quotes_db,
            port: port.unwrap_or(8080),
            host: host.unwrap_or_else(|| "0.0.0.0".to_string()),
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        let ip = self.host.parse::<std::net::IpAddr>().unwrap_or_else(|e| {
            log::warn!("Host '{}' is not an IP address ({}), binding 0.0.0.0", self.host, e);
            std::net::IpAddr::from([0, 0, 0, 0])
        });
        std::net::SocketAddr::new(ip, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
