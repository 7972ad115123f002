//! CLI handlers for locating, creating and repairing the storage file.

use std::path::Path;

use anyhow::Context;

use keyval::StorageResolver;

pub fn show(resolver: &StorageResolver) -> anyhow::Result<()> {
    eprintln!("config: {}", resolver.config_path().display());

    match resolver.load_existing()? {
        Some(store) => println!("{}", store.path().display()),
        None => {
            eprintln!("storage: (not created yet)");
            eprintln!("  run `keyval init` to create it");
        }
    }
    Ok(())
}

pub fn init(resolver: &StorageResolver, force: bool) -> anyhow::Result<()> {
    if !force {
        let existing = resolver
            .load_existing()
            .context("config points at an unusable storage file; use --force to replace it")?;
        if let Some(store) = existing {
            eprintln!(
                "  {} storage already set up at {}",
                console::style("!").yellow().bold(),
                store.path().display()
            );
            eprintln!("  use --force to create a new one");
            return Ok(());
        }
    }

    let store = if force {
        resolver.recreate()?
    } else {
        resolver.create_new()?
    };
    eprintln!(
        "  {} storage ready at {}",
        console::style("✓").green().bold(),
        store.path().display()
    );
    eprintln!(
        "  {} config saved to {}",
        console::style("✓").green().bold(),
        resolver.config_path().display()
    );
    Ok(())
}

pub fn repoint(resolver: &StorageResolver, file: &Path) -> anyhow::Result<()> {
    let store = resolver
        .repoint(file)
        .with_context(|| format!("cannot point config at {}", file.display()))?;
    eprintln!(
        "  {} config now points at {}",
        console::style("✓").green().bold(),
        store.path().display()
    );
    Ok(())
}
