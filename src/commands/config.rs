use anyhow::Result;
use owo_colors::OwoColorize;
use plandash_core::config::PlanDashConfig;

pub fn run(config: &PlanDashConfig) -> Result<()> {
    let config_path = PlanDashConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Dashboard:  {}", config.slot().path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }
    println!("  {}", format!("# time zone in use: {}", config.timezone()?).dimmed());

    Ok(())
}
