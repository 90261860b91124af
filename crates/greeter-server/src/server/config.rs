use anyhow::bail;
use clap::Parser;
use greeter_core::types::{DEFAULT_GREETING, DEFAULT_PORT};

/// Runtime configuration for the `greeter-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "greeter-server",
    version,
    about = "A gRPC service demonstrating unary and streaming greetings"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:8080" or "/tmp/greeter.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = format!("0.0.0.0:{DEFAULT_PORT}"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Greeting returned by `SayHello` and prefixed to every streamed name.
    ///
    /// Environment variable: `GREETING`
    #[arg(long, env = "GREETING", default_value_t = String::from(DEFAULT_GREETING))]
    pub greeting: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub greeting: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            uds: false,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        // Every response must carry a non-empty message.
        let greeting = args.greeting.trim();
        if greeting.is_empty() {
            bail!("GREETING must not be blank");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            greeting: greeting.to_string(),
        })
    }
}
