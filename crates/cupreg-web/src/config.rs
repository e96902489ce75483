use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default)]
    pub teams: Vec<TeamConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for the administrator console. Empty means
    /// unconfigured: admin logins answer with a configuration error until
    /// it is set, while captain logins are unaffected.
    #[serde(default)]
    pub admin_secret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Seed account loaded into the team store at boot.
///
/// `credential` is stored as-is: a bcrypt hash for accounts issued by
/// this system, or a legacy plaintext password for accounts that predate
/// hashing.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub captain_name: String,
    pub email: String,
    pub credential: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("CUPREG_WEB_CONFIG").map(PathBuf::from).ok();

        let mut config = if let Some(path) = config_path {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            ServerConfig {
                bind_addr: default_bind_addr(),
                auth: AuthConfig::default(),
                tls: TlsConfig::default(),
                teams: Vec::new(),
            }
        };

        if let Ok(secret) = std::env::var("CUPREG_ADMIN_SECRET") {
            config.auth.admin_secret = secret;
        }
        if let Ok(addr) = std::env::var("CUPREG_BIND_ADDR") {
            config.bind_addr = addr.parse()?;
        }
        if let Ok(cert) = std::env::var("CUPREG_TLS_CERT") {
            config.tls.cert_path = Some(cert);
        }
        if let Ok(key) = std::env::var("CUPREG_TLS_KEY") {
            config.tls.key_path = Some(key);
        }

        if config.auth.admin_secret.is_empty() {
            tracing::warn!(
                "No administrator secret configured. Admin logins will return a \
                 configuration error until CUPREG_ADMIN_SECRET is set."
            );
        }

        Ok(config)
    }
}
