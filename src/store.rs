//! 上一次成功切换的镜像记录（跨重启保存）

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// 记录使用的固定 key
pub const LAST_REGISTRY_KEY: &str = "npmMirror.lastRegistry";

pub trait PreferenceStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, value: &str) -> Result<()>;
}

/// 以 JSON 对象保存在磁盘上的 key-value 记录
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("读取 {} 失败", self.path.display()))?;
        let entries = serde_json::from_str(&content)
            .with_context(|| format!("解析 {} 失败", self.path.display()))?;
        Ok(entries)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(LAST_REGISTRY_KEY),
            Err(e) => {
                log::warn!("读取镜像记录失败: {:#}", e);
                None
            }
        }
    }

    fn set(&mut self, value: &str) -> Result<()> {
        // 保留文件中其他 key；原文件损坏时直接覆盖
        let mut entries = self.load().unwrap_or_default();
        entries.insert(LAST_REGISTRY_KEY.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)
            .with_context(|| format!("写入 {} 失败", self.path.display()))?;
        Ok(())
    }
}
