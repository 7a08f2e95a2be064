//! 用户偏好存储
//!
//! host shell 的偏好保存在数据目录下的 preferences.json。
//! 文件缺失或损坏时回退到默认值，更新按键合并（partial update）。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{Result, UtmkaError};

/// host shell 的用户偏好
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub onboarding_done: bool,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_lang() -> String {
    "ru".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: default_theme(),
            lang: default_lang(),
            onboarding_done: false,
        }
    }
}

/// POST /api/preferences 的部分更新载荷，缺省的键保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesUpdate {
    pub theme: Option<String>,
    pub lang: Option<String>,
    pub onboarding_done: Option<bool>,
}

/// 基于 JSON 文件的偏好存储
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(data_dir: &Path) -> Self {
        PreferencesStore {
            path: data_dir.join("preferences.json"),
        }
    }

    /// 读取偏好，文件缺失或损坏时返回默认值
    pub fn load(&self) -> Preferences {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {}, falling back to defaults",
                        self.path.display(),
                        e
                    );
                    Preferences::default()
                }
            },
            Err(_) => Preferences::default(),
        }
    }

    /// 合并部分更新并写回，返回合并后的完整偏好
    pub fn update(&self, update: PreferencesUpdate) -> Result<Preferences> {
        let mut prefs = self.load();

        if let Some(theme) = update.theme {
            prefs.theme = theme;
        }
        if let Some(lang) = update.lang {
            prefs.lang = lang;
        }
        if let Some(done) = update.onboarding_done {
            prefs.onboarding_done = done;
        }

        self.save(&prefs)?;
        Ok(prefs)
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| UtmkaError::file_operation(format!("创建数据目录失败: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, content)
            .map_err(|e| UtmkaError::file_operation(format!("写入偏好文件失败: {}", e)))?;

        debug!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path());

        let prefs = store.load();
        assert_eq!(prefs.theme, "dark");
        assert_eq!(prefs.lang, "ru");
        assert!(!prefs.onboarding_done);
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("preferences.json"), "{not json").unwrap();

        let store = PreferencesStore::new(dir.path());
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_partial_update_merges_known_keys() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path());

        let prefs = store
            .update(PreferencesUpdate {
                theme: Some("light".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(prefs.theme, "light");
        assert_eq!(prefs.lang, "ru");

        // 再次更新另一个键，已更新的键保持不变
        let prefs = store
            .update(PreferencesUpdate {
                onboarding_done: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(prefs.theme, "light");
        assert!(prefs.onboarding_done);
    }

    #[test]
    fn test_update_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path());

        store
            .update(PreferencesUpdate {
                lang: Some("en".to_string()),
                ..Default::default()
            })
            .unwrap();

        let reloaded = PreferencesStore::new(dir.path()).load();
        assert_eq!(reloaded.lang, "en");
    }
}
