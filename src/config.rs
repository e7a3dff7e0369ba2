use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/osm_shape.json";
pub const DEFAULT_DEST_PATH: &str = "output";

#[derive(Deserialize, Debug, Clone)]
pub struct UserConfig {
    /// Input .osm file, optionally xz compressed.
    pub data_path: String,
    #[serde(default = "default_dest_path")]
    pub dest_path: String,
    /// Spread each JSON document over several lines.
    #[serde(default)]
    pub pretty: bool,
    /// Ignore tags with quotes, spaces or punctuation in their key.
    #[serde(default)]
    pub skip_problem_keys: bool,
}

fn default_dest_path() -> String {
    DEFAULT_DEST_PATH.to_string()
}

pub fn load_user_config(path: &str) -> Result<UserConfig> {
    let file = File::open(path)
        .map_err(|err| format!("Could not open config file {path}: {err}"))?;
    Ok(serde_json::from_reader(file)?)
}

pub fn create_output_dir(config: &UserConfig) -> Result<PathBuf> {
    let output_dir = Path::new(&config.dest_path).to_path_buf();
    create_dir_all(&output_dir)?;
    Ok(output_dir)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn config_defaults_optional_fields() {
        let config: UserConfig = serde_json::from_str(r#"{"data_path": "data/chicago.osm.xz"}"#).unwrap();

        assert_eq!(config.data_path, "data/chicago.osm.xz");
        assert_eq!(config.dest_path, DEFAULT_DEST_PATH);
        assert!(!config.pretty);
        assert!(!config.skip_problem_keys);
    }

    #[test]
    fn loads_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_path": "a.osm", "dest_path": "out", "pretty": true}"#).unwrap();

        let config = load_user_config(path.to_str().unwrap()).unwrap();

        assert_eq!(config.dest_path, "out");
        assert!(config.pretty);
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = load_user_config("does/not/exist.json").unwrap_err();
        assert!(err.message.contains("does/not/exist.json"));
    }

    #[test]
    fn unparsable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"dest_path": "out"}"#).unwrap();

        assert!(load_user_config(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = UserConfig {
            data_path: "a.osm".to_string(),
            dest_path: dir.path().join("nested/output").to_string_lossy().into_owned(),
            pretty: false,
            skip_problem_keys: false,
        };

        let output_dir = create_output_dir(&config).unwrap();

        assert!(output_dir.is_dir());
    }
}
