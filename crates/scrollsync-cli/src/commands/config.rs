use std::path::Path;

use anyhow::Result;

use scrollsync_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, path_only: bool, init: bool) -> Result<()> {
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            AppConfig::default().save_to(path)?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    println!("# Effective configuration ({})\n", source);
    print!("{}", config.to_toml()?);

    Ok(())
}
