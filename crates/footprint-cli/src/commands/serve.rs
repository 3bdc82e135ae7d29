//! Web server command

use std::path::Path;

use anyhow::Result;

use super::core::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16) -> Result<()> {
    let db = open_db(db_path)?;

    println!("🌍 Footprint server starting at http://{}:{}", host, port);
    println!("   API base: http://{}:{}/api", host, port);

    footprint_server::serve(db, host, port).await
}
