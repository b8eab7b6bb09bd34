use anyhow::Result;
use owo_colors::OwoColorize;
use turnover_core::FeedSource;
use turnover_core::config::Config;

pub fn run(config: &Config, source: Option<&FeedSource>, init: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if init {
        if config_path.exists() {
            anyhow::bail!("Config file already exists at {}", config_path.display());
        }
        Config::create_default_config(&config_path)?;
        println!("Created {}", config_path.display());
        return Ok(());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());

    println!("{}", "Feed".bold());
    match source {
        Some(source) => println!("  Source:  {source}"),
        None => println!("  Source:  {}", "not configured (run `turnover config --init`)".dimmed()),
    }
    println!("  Cache:   {}s", config.cache_ttl_secs);
    println!("  Locale:  {}", config.locale.code());

    Ok(())
}
