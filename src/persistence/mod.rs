use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use crate::core::CubeError;

const APP_NAME: &str = "rosscube";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), CubeError> {
    write_json(data, &get_data_file_path(filename))
}

pub fn write_json<T: Serialize>(data: &T, file_path: &Path) -> Result<(), CubeError> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, serde_json::to_string_pretty(data)?)?;
    info!("Data saved to: {}", file_path.display());
    Ok(())
}

/// A missing file reads as `T::default()`; a malformed one is an error.
pub fn read_json<T>(file_path: &Path) -> Result<T, CubeError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !file_path.exists() {
        return Ok(T::default());
    }

    let data: T = serde_json::from_str(&fs::read_to_string(file_path)?)?;
    info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rosscube-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_json_round_trip() {
        let path = scratch_file("nested/packs.json");
        let packs: HashMap<String, u32> = [("W - Angels".to_string(), 12)].into_iter().collect();

        write_json(&packs, &path).unwrap();
        let loaded: HashMap<String, u32> = read_json(&path).unwrap();
        assert_eq!(loaded, packs);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_reads_default_and_garbage_fails() {
        let missing: Vec<String> = read_json(&scratch_file("missing.json")).unwrap();
        assert!(missing.is_empty());

        let path = scratch_file("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_json::<Vec<String>>(&path), Err(CubeError::Json(_))));
        let _ = fs::remove_file(&path);
    }
}
