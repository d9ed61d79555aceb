//! The `config` command — show the resolved configuration.

use draftsmith_config::AppConfig;

pub async fn run(default: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default {
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load()?;
    // Debug output redacts credentials.
    println!("{config:#?}");
    Ok(())
}
