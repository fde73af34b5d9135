pub mod config;

use anyhow::Result;
use std::sync::OnceLock;

pub static CONFIG: OnceLock<config::HomelabConfig> = OnceLock::new();
// type alias for above's lifetime
pub type HomelabConfig = &'static config::HomelabConfig;

/// get config from global, or load from defaults/file/environment if not parsed yet
pub fn get_config() -> Result<HomelabConfig> {
    // return already parsed value
    if let Some(existing) = CONFIG.get() {
        return Ok(existing);
    }

    let config = config::parse();

    // if config parsed OK, set global and return that
    // otherwise pass through the errors from parsing
    config.map(|c| CONFIG.get_or_init(|| c))
}
