//! CLI handler for the key-value subcommands.

use anyhow::Context;
use serde_json::Value;

use keyval::StorageResolver;

use super::kv::KvCommand;

pub fn run(resolver: &StorageResolver, command: KvCommand) -> anyhow::Result<()> {
    let mut store = resolver.resolve()?;
    let reserved = resolver.storage_path_key();

    match command {
        KvCommand::Get { key } => match store.get(&key) {
            Some(Value::String(s)) => println!("{s}"),
            Some(value) => println!("{value}"),
            None => eprintln!("(not found)"),
        },
        KvCommand::Set { key, value, json } => {
            if key == reserved {
                anyhow::bail!("`{key}` is reserved for the storage self-check");
            }
            let value = if json {
                serde_json::from_str(&value)
                    .with_context(|| format!("value is not valid JSON: {value}"))?
            } else {
                Value::String(value)
            };
            store.set(key, value)?;
            eprintln!("OK");
        }
        KvCommand::Delete { key } => {
            if key == reserved {
                anyhow::bail!("`{key}` is reserved for the storage self-check");
            }
            if store.delete(&key)?.is_some() {
                eprintln!("deleted");
            } else {
                eprintln!("(not found)");
            }
        }
        KvCommand::List { prefix, limit } => {
            let keys = store.keys(prefix.as_deref(), limit);
            if keys.is_empty() {
                eprintln!("(empty)");
            }
            for key in keys {
                println!("{key}");
            }
        }
    }
    Ok(())
}
