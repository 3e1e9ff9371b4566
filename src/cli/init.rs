use std::path::PathBuf;

use crate::db::SqliteStore;
use crate::error::Result;
use crate::settings::{save_settings, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings { data_dir: dir },
        None => Settings::default(),
    };

    let dir = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&dir)?;
    SqliteStore::open(&dir.join("penny.db"))?;
    save_settings(&settings)?;

    println!("Initialized Penny data directory: {}", dir.display());
    Ok(())
}
