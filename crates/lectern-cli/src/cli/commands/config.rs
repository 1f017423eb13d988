use anyhow::{bail, Result};
use lectern_core::config::{paths, Config};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let path = paths::config_path();
    if Config::init()? {
        println!("Created config at {}", path.display());
        Ok(())
    } else {
        bail!("Config already exists at {}", path.display())
    }
}
