//! The sector → actionable-guidance lookup.
//!
//! This is domain knowledge kept as data: the built-in table can be replaced
//! wholesale by a JSON object file without touching the synthesizer.

use crate::chart::sector::is_canonical;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Guidance returned for sectors the table does not cover.
pub const PLACEHOLDER_GUIDANCE: &str = "（可操作方向：待補）";

const DEFAULT_GUIDANCE: [(&str, &str); 12] = [
    ("命宫", "自我定位/習慣系統/決策風格（長期設計，不追求短期改命）"),
    ("官禄", "目標拆解/流程與執行/事業策略（可操作）"),
    ("财帛", "現金流/定價與成本/資源配置（可操作）"),
    ("福德", "壓力調節/睡眠與恢復/心態與續航（可操作）"),
    ("迁移", "外部機會/人脈場域/曝光與渠道（可操作）"),
    ("仆役", "團隊協作/合作邊界/管理方式（可操作）"),
    ("夫妻", "溝通機制/期待管理/界線（可操作）"),
    ("疾厄", "身心負荷管理/作息（節奏管理）"),
    ("田宅", "環境與資產配置（可操作）"),
    ("父母", "長輩/上層資源互動（可操作）"),
    ("兄弟", "同輩合作/競合（可操作）"),
    ("子女", "教育/養育策略（可操作）"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidanceTable {
    entries: BTreeMap<String, String>,
}

impl Default for GuidanceTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_GUIDANCE
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl GuidanceTable {
    pub fn from_entries(entries: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        if let Some(bad) = entries.keys().find(|k| !is_canonical(k)) {
            return Err(ConfigError::Invalid(format!(
                "guidance table key '{}' is not a canonical sector name",
                bad
            )));
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Guidance for a sector; unknown sectors get [`PLACEHOLDER_GUIDANCE`].
    pub fn lookup(&self, sector: &str) -> &str {
        self.entries
            .get(sector)
            .map_or(PLACEHOLDER_GUIDANCE, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
