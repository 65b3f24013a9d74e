use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::state::CaughtPokemon;

/// Write the caught list as pretty JSON, creating the parent dir on first
/// save.
pub async fn save_caught(path: &Path, entries: &[CaughtPokemon]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| err.to_string())?;
    }
    let json = serde_json::to_string_pretty(entries).map_err(|err| err.to_string())?;
    fs::write(path, json).await.map_err(|err| err.to_string())
}

/// Read the caught list back. A missing file is the empty first-run state,
/// not an error.
pub async fn load_caught(path: &Path) -> Result<Vec<CaughtPokemon>, String> {
    let json = match fs::read_to_string(path).await {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.to_string()),
    };
    serde_json::from_str(&json).map_err(|err| format!("Caught list corrupted: {err}"))
}

/// Delete the caught file and nothing else. Clearing an absent file is fine.
pub async fn clear_caught(path: &Path) -> Result<(), String> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.to_string()),
    }
}
