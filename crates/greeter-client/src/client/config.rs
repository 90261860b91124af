use anyhow::Context;
use clap::{Parser, ValueEnum};
use core::fmt;
use greeter_core::{
    proto::NamesList,
    types::{DEFAULT_NAMES, DEFAULT_PORT},
};
use tonic::{codec::CompressionEncoding, transport::Endpoint};

/// Message compression negotiated with the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    #[default]
    None,
    Zstd,
    Gzip,
    Deflate,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Zstd => write!(f, "zstd"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Deflate => write!(f, "deflate"),
        }
    }
}

impl From<Compression> for Option<CompressionEncoding> {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => None,
            Compression::Zstd => Some(CompressionEncoding::Zstd),
            Compression::Gzip => Some(CompressionEncoding::Gzip),
            Compression::Deflate => Some(CompressionEncoding::Deflate),
        }
    }
}

/// Runtime configuration for the `greeter-client` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "greeter-client",
    version,
    about = "Runs the unary and streaming greeting calls against a greeter server"
)]
pub struct CliArgs {
    /// URI of the greeter server.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = format!("http://localhost:{DEFAULT_PORT}"))]
    pub server_addr: String,

    /// Comma-separated names sent by the streaming calls.
    ///
    /// Environment variable: `NAMES`
    #[arg(
        long,
        env = "NAMES",
        value_delimiter = ',',
        default_values_t = DEFAULT_NAMES.map(String::from)
    )]
    pub names: Vec<String>,

    /// Compression applied to requests and accepted on responses.
    ///
    /// Environment variable: `COMPRESSION`
    #[arg(long, env = "COMPRESSION", value_enum, default_value_t = Compression::None)]
    pub compression: Compression,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub names: NamesList,
    pub compression: Compression,
}

impl ClientConfig {
    /// Configuration for `server_addr` with the default names and no
    /// compression.
    pub fn new(server_addr: impl Into<String>) -> anyhow::Result<Self> {
        Self::try_from(CliArgs {
            server_addr: server_addr.into(),
            names: DEFAULT_NAMES.map(String::from).to_vec(),
            compression: Compression::None,
        })
    }
}

impl TryFrom<CliArgs> for ClientConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let endpoint = Endpoint::from_shared(args.server_addr.clone())
            .with_context(|| format!("invalid SERVER_ADDR `{}`", args.server_addr))?;

        Ok(Self {
            endpoint,
            names: args.names.into_iter().collect(),
            compression: args.compression,
        })
    }
}
