use clap::Subcommand;

#[derive(Subcommand)]
pub enum KvCommand {
    /// Get a value by key
    Get {
        key: String,
    },

    /// Set a key-value pair
    Set {
        key: String,
        value: String,

        /// Parse the value as JSON instead of storing it as a string
        #[arg(long)]
        json: bool,
    },

    /// Delete a key
    Delete {
        key: String,
    },

    /// List keys with optional prefix
    List {
        /// Key prefix filter
        #[arg(long)]
        prefix: Option<String>,

        /// Max number of keys to return
        #[arg(long, default_value = "100")]
        limit: usize,
    },
}
