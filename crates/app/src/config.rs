//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "words", version, about = "Vocabulary flashcards backend")]
pub struct Cli {
    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The subcommand to run; `serve` with its defaults when none was given.
    #[must_use]
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(ServeArgs::from_env()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageMode {
    /// JSON data file
    File,
    /// SQLite database
    Db,
    /// Another running words server
    Remote,
}

#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Where words are kept
    #[arg(long, env = "STORAGE_MODE", value_enum, default_value_t = StorageMode::File)]
    pub storage_mode: StorageMode,

    /// Data file used in `file` mode
    #[arg(long, env = "WORDS_DATA_FILE", default_value = "words.json")]
    pub data_file: PathBuf,

    /// Database URL used in `db` mode
    #[arg(long, env = "WORDS_DB_URL", default_value = "sqlite://words.sqlite3?mode=rwc")]
    pub db_url: String,

    /// Server origin used in `remote` mode
    #[arg(long, env = "WORDS_API_URL", default_value = "http://127.0.0.1:5000")]
    pub api_url: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve(ServeArgs),

    /// Load words from a JSON file into the configured store
    Import {
        /// JSON array of words, or a data file from `file` mode
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ServeArgs {
    /// Defaults for a bare invocation, still honouring `HOST` and `PORT`.
    fn from_env() -> Self {
        #[derive(Parser)]
        struct Bare {
            #[command(flatten)]
            serve: ServeArgs,
        }
        match Bare::try_parse_from(["words"]) {
            Ok(bare) => bare.serve,
            Err(_) => Self {
                host: "127.0.0.1".to_owned(),
                port: 5000,
            },
        }
    }

    /// # Errors
    ///
    /// Returns an error if `host:port` is not a socket address.
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
