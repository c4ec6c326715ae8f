use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use covers_engine::PipelineConfig;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "download_covers.ron";

/// Optional overrides read from `download_covers.ron`. Every field falls back
/// to the compiled-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub site_base: Option<String>,
    pub gallery_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub url_store: Option<PathBuf>,
    pub reuse_url_store: Option<bool>,
    pub user_agent: Option<String>,
    pub image_timeout_secs: Option<u64>,
    pub log: Option<LogDestination>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&text)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

impl FileConfig {
    pub fn log_destination(&self) -> LogDestination {
        self.log.unwrap_or_default()
    }

    pub fn level_filter(&self) -> LevelFilter {
        if self.verbose.unwrap_or(false) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn into_pipeline_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        if let Some(site_base) = self.site_base {
            config.site_base = site_base;
        }
        if let Some(gallery_url) = self.gallery_url {
            config.gallery_url = gallery_url;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(url_store) = self.url_store {
            config.url_store_path = url_store;
        }
        if let Some(reuse) = self.reuse_url_store {
            config.reuse_url_store = reuse;
        }
        if let Some(user_agent) = self.user_agent {
            config.gallery_fetch.user_agent = user_agent.clone();
            config.image_fetch.user_agent = user_agent;
        }
        if let Some(secs) = self.image_timeout_secs {
            config.image_fetch.request_timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covers_engine::{BROWSER_USER_AGENT, DEFAULT_GALLERY_URL};
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let loaded = load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn defaults_match_the_fixed_constants() {
        let config = FileConfig::default().into_pipeline_config();
        assert_eq!(config.gallery_url, DEFAULT_GALLERY_URL);
        assert_eq!(config.site_base, "https://gameinformer.com");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.url_store_path, PathBuf::from("urls.json"));
        assert!(!config.reuse_url_store);
        assert_eq!(config.image_fetch.user_agent, BROWSER_USER_AGENT);
        assert_eq!(config.image_fetch.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.gallery_fetch.request_timeout, None);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                output_dir: Some("covers"),
                reuse_url_store: Some(true),
                image_timeout_secs: Some(5),
                log: Some(Both),
            )"#,
        )
        .unwrap();

        let file = load(&path).unwrap().unwrap();
        assert_eq!(file.log_destination(), LogDestination::Both);
        assert_eq!(file.level_filter(), LevelFilter::Info);

        let config = file.into_pipeline_config();
        assert_eq!(config.output_dir, PathBuf::from("covers"));
        assert!(config.reuse_url_store);
        assert_eq!(config.image_fetch.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.gallery_fetch.request_timeout, None);
        assert_eq!(config.gallery_url, DEFAULT_GALLERY_URL);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(output_directory: Some(\"x\"))").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }
}
