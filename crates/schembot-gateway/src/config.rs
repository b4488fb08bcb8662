//! Gateway configuration.

use clap::Parser;

/// schembot gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "schembot-gateway")]
#[command(about = "HTTP/JSON command gateway for schematic inspection")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Bearer token required on command requests. Unset disables auth.
    #[arg(long, env = "SCHEMBOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Maximum accepted upload size in bytes.
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Bearer token required on command requests.
    pub token: Option<String>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            token: args.token.clone(),
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            token: None,
            max_upload_bytes: 8 * 1024 * 1024,
        }
    }
}
