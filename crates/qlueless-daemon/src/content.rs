//! Static documents preloaded at startup

use crate::config::ContentConfig;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Changelog and OpenAPI documents served verbatim
///
/// A document that failed to load is `None`; its endpoint answers 500.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    pub changelog: Option<String>,
    pub openapi: Option<Value>,
}

impl StaticContent {
    pub fn from_parts(changelog: Option<String>, openapi: Option<Value>) -> Self {
        Self { changelog, openapi }
    }

    pub async fn load(config: &ContentConfig) -> Self {
        let changelog = read_text(&config.changelog_path).await;
        let openapi = match read_text(&config.openapi_path).await {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(path = %config.openapi_path.display(), error = %e, "OpenAPI document is not valid JSON");
                    None
                }
            },
            None => None,
        };

        Self { changelog, openapi }
    }
}

async fn read_text(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            info!(path = %path.display(), bytes = text.len(), "Loaded static content");
            Some(text)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load static content");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(contents: &str, extension: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("qlueless-{}.{}", uuid::Uuid::new_v4(), extension));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_reads_both_documents() {
        let config = ContentConfig {
            changelog_path: temp_file("# Changelog\n", "md"),
            openapi_path: temp_file(r#"{ "openapi": "3.0.0" }"#, "json"),
        };

        let content = StaticContent::load(&config).await;
        assert_eq!(content.changelog.as_deref(), Some("# Changelog\n"));
        assert_eq!(content.openapi.unwrap()["openapi"], "3.0.0");

        std::fs::remove_file(config.changelog_path).unwrap();
        std::fs::remove_file(config.openapi_path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_or_malformed_documents_are_none() {
        let config = ContentConfig {
            changelog_path: PathBuf::from("/nonexistent/CHANGELOG.md"),
            openapi_path: temp_file("not json", "json"),
        };

        let content = StaticContent::load(&config).await;
        assert!(content.changelog.is_none());
        assert!(content.openapi.is_none());

        std::fs::remove_file(config.openapi_path).unwrap();
    }
}
