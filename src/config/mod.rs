use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A draft the user exported, most recent last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    pub title: String,
    pub tool: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Default language preselected by tools with a language field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Tool opened last time (preselected in the catalog)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_tool: Option<String>,

    /// Where exported drafts are written (defaults to ~/Documents/penna)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Show desktop notifications on export
    #[serde(default)]
    pub notifications: bool,

    /// Recently exported drafts
    #[serde(default)]
    pub recent_drafts: Vec<DraftRecord>,
}

/// How many exported drafts to remember.
const RECENT_LIMIT: usize = 20;

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("penna");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Clean up the record list before saving
        let mut clean_config = self.clone();
        clean_config.recent_drafts.retain(|r| !r.title.is_empty());
        let len = clean_config.recent_drafts.len();
        if len > RECENT_LIMIT {
            clean_config.recent_drafts.drain(0..len - RECENT_LIMIT);
        }

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory exported drafts are written to.
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }
        dirs::document_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("penna")
    }

    /// Record an exported draft, replacing any older record for the same file.
    pub fn remember_draft(&mut self, record: DraftRecord) {
        self.recent_drafts.retain(|r| r.path != record.path);
        self.recent_drafts.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_language: Some("English".to_string()),
            last_tool: Some("guided".to_string()),
            export_dir: Some(PathBuf::from("/tmp/penna")),
            notifications: true,
            recent_drafts: vec![DraftRecord {
                title: "Composting 101".to_string(),
                tool: "one-click".to_string(),
                path: PathBuf::from("/tmp/penna/composting-101.md"),
            }],
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.last_tool, deserialized.last_tool);
        assert_eq!(config.recent_drafts.len(), deserialized.recent_drafts.len());
        assert_eq!(config.export_dir, deserialized.export_dir);
    }

    #[test]
    fn remember_draft_dedupes_by_path() {
        let mut config = AppConfig::default();
        let record = DraftRecord {
            title: "A".to_string(),
            tool: "guided".to_string(),
            path: PathBuf::from("/tmp/a.md"),
        };
        config.remember_draft(record.clone());
        config.remember_draft(DraftRecord {
            title: "A v2".to_string(),
            ..record
        });
        assert_eq!(config.recent_drafts.len(), 1);
        assert_eq!(config.recent_drafts[0].title, "A v2");
    }
}
