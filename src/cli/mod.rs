pub mod kv;
pub mod kv_handler;
pub mod setup_handler;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keyval::storage::{FixedFolder, PromptFolder, ResolverConfig, StorageResolver};

/// JSON-file key-value storage
#[derive(Parser)]
#[command(
    name = "keyval",
    version,
    about = "JSON-file key-value storage with a self-checking config pointer"
)]
pub struct Cli {
    /// Folder holding the config (pointer) file [default: ~/.config/keyval]
    #[arg(long, global = true, env = "KEYVAL_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Data folder for a new storage file (skips the interactive prompt)
    #[arg(long, global = true, env = "KEYVAL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(flatten)]
    Kv(kv::KvCommand),

    /// Show where the config and storage files live
    Where,

    /// Create a new storage file and point the config at it
    Init {
        /// Replace the config even if it points at a storage file or is unreadable
        #[arg(long)]
        force: bool,
    },

    /// Point the config at an existing storage file
    Repoint {
        /// Storage file that records its own path
        file: PathBuf,
    },
}

impl Cli {
    pub fn resolver(&self) -> StorageResolver {
        let config_dir = self.config_dir.clone().unwrap_or_else(default_config_dir);
        let config = ResolverConfig::new(config_dir);

        match &self.data_dir {
            Some(dir) => StorageResolver::new(config, FixedFolder(dir.clone())),
            None => StorageResolver::new(config, PromptFolder::default()),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs_home().join(".config").join("keyval")
}

fn dirs_home() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
