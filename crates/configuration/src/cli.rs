use crate::settings::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command-line flags for the server. Each flag, when given, overrides the value
/// loaded from the configuration file and environment.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Serves the overnight bond futures dashboard.", long_about = None)]
pub struct ServeArgs {
    /// Path to the TOML configuration file. A missing file is not an error.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// The interface to bind (e.g., "0.0.0.0").
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding one `<TICKER>.csv` file per contract.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn apply_overrides(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &args.data_dir {
            self.data.directory = data_dir.clone();
        }
    }
}
