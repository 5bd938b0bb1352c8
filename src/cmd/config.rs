use std::path::Path;

use anyhow::Result;

use slidesplit::config::config_path;
use slidesplit::SplitConfig;

pub fn cmd_config(config: &SplitConfig, explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => println!("# loaded from {}", path.display()),
        None => {
            let path = config_path();
            if path.exists() {
                println!("# loaded from {}", path.display());
            } else {
                println!("# {} not found, showing defaults", path.display());
            }
        }
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
