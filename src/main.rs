use std::io::{self, Read, Write};

use category_catalog::core::config::Config;
use category_catalog::core::logging;
use category_catalog::{Category, DomainError};
use serde_json::Value;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    logging::init(&config.logging)?;

    tracing::info!("Configuration loaded successfully");

    let input = match &config.seed.file {
        Some(path) => {
            tracing::info!("Reading category seed from {}", path.display());
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?
        }
        None => {
            tracing::info!("Reading category seed from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let entries = match serde_json::from_str::<Value>(&input)? {
        Value::Array(entries) => entries,
        entry => vec![entry],
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = 0usize;

    for (index, entry) in entries.into_iter().enumerate() {
        match Category::create_from_value(entry) {
            Ok(category) => {
                let snapshot = category.to_json();
                let line = if config.seed.pretty {
                    serde_json::to_string_pretty(&snapshot)?
                } else {
                    serde_json::to_string(&snapshot)?
                };
                writeln!(out, "{}", line)?;
            }
            Err(DomainError::Validation(err)) => {
                rejected += 1;
                for (field, messages) in err.messages() {
                    tracing::warn!(entry = index, field = %field, "{}", messages.join("; "));
                }
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(entry = index, "{}", e);
            }
        }
    }

    out.flush()?;

    if rejected > 0 {
        anyhow::bail!("{} category seed entries rejected", rejected);
    }

    tracing::info!("All category seed entries are valid");
    Ok(())
}
