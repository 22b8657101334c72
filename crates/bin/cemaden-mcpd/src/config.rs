use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cemaden_store::schema::URL_ALERT_PANEL;

const DEFAULT_DATASET_PATH: &str = "data/municipios.json";
const DEFAULT_PANEL_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:4031";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GATEWAY_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "cemaden-mcpd", version, about = "CEMADEN alert metadata MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "CEMADEN_DATASET_PATH", default_value = DEFAULT_DATASET_PATH)]
    dataset_path: PathBuf,

    #[arg(long, env = "CEMADEN_PANEL_URL", default_value = URL_ALERT_PANEL)]
    panel_url: String,

    #[arg(
        long,
        env = "CEMADEN_PANEL_TIMEOUT_SECS",
        default_value_t = DEFAULT_PANEL_TIMEOUT_SECS
    )]
    panel_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "CEMADEN_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "CEMADEN_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(
        long,
        env = "CEMADEN_GATEWAY_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    gateway_serve: bool,

    #[arg(long, env = "CEMADEN_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(long, env = "CEMADEN_GATEWAY_ADDR", default_value = DEFAULT_GATEWAY_ADDR)]
    gateway_addr: SocketAddr,

    #[arg(
        long,
        env = "CEMADEN_GATEWAY_TIMEOUT_SECS",
        default_value_t = DEFAULT_GATEWAY_TIMEOUT_SECS
    )]
    gateway_timeout_secs: u64,

    #[arg(
        long,
        env = "CEMADEN_GATEWAY_MAX_BODY_BYTES",
        default_value_t = DEFAULT_GATEWAY_MAX_BODY_BYTES
    )]
    gateway_max_body_bytes: usize,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct CemadenConfig {
    pub dataset_path: PathBuf,
    pub panel_url: String,
    pub panel_timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub gateway_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub gateway_addr: SocketAddr,
    pub gateway_timeout: Duration,
    pub gateway_max_body_bytes: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CemadenConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

/// Resolves a relative dataset path against the working directory first and
/// then the directory holding the executable. Absolute paths are kept as is.
fn resolve_dataset_path(path: PathBuf, cwd: Option<&Path>, exe_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    [cwd, exe_dir]
        .into_iter()
        .flatten()
        .map(|base| base.join(&path))
        .find(|candidate| candidate.is_file())
        .unwrap_or(path)
}

impl TryFrom<CliArgs> for CemadenConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let panel_url = args.panel_url.trim().to_string();
        if panel_url.is_empty() {
            return Err(ConfigError::MissingSetting("CEMADEN_PANEL_URL"));
        }

        if args.dataset_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingSetting("CEMADEN_DATASET_PATH"));
        }

        if args.panel_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "CEMADEN_PANEL_TIMEOUT_SECS",
                value: args.panel_timeout_secs.to_string(),
            });
        }

        if args.gateway_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "CEMADEN_GATEWAY_TIMEOUT_SECS",
                value: args.gateway_timeout_secs.to_string(),
            });
        }

        if !(args.enable_stdio || args.mcp_serve || args.gateway_serve) {
            return Err(ConfigError::InvalidSetting {
                name: "CEMADEN_ENABLE_STDIO",
                value: "no transport enabled".to_string(),
            });
        }

        let cwd = std::env::current_dir().ok();
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let dataset_path =
            resolve_dataset_path(args.dataset_path, cwd.as_deref(), exe_dir.as_deref());

        Ok(Self {
            dataset_path,
            panel_url,
            panel_timeout: Duration::from_secs(args.panel_timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            gateway_serve: args.gateway_serve,
            mcp_http_addr: args.mcp_http_addr,
            gateway_addr: args.gateway_addr,
            gateway_timeout: Duration::from_secs(args.gateway_timeout_secs),
            gateway_max_body_bytes: args.gateway_max_body_bytes,
        })
    }
}
