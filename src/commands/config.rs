use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use unisync_core::config::UnisyncConfig;

pub fn run() -> Result<()> {
    let config_path = UnisyncConfig::config_path().context("Failed to locate config file")?;

    if !config_path.exists() {
        UnisyncConfig::create_default_config(&config_path)?;
        println!("{} {}", "Created".green(), config_path.display());
        println!();
    }

    let config = UnisyncConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:         {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!(
        "  Institution:    {} {}",
        config.institution(),
        format!("({})", config.institution().name()).dimmed()
    );
    println!("  Timezone:       {}", config.timezone);
    println!("  Calendar:       {}", config.calendar_name);
    match config.exclude_from {
        Some(cutoff) => println!("  Exclude from:   {}", cutoff),
        None => println!("  Exclude from:   {}", "not set".dimmed()),
    }

    Ok(())
}
