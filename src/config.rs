use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 执行命令所用的 shell
    pub shell: String,
    /// 传给 shell 的“执行字符串”参数
    pub shell_flag: String,
    /// 命令超时（秒），不设置则无限等待
    pub command_timeout_secs: Option<u64>,
    /// 上一次镜像记录的存放位置
    pub state_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let (shell, shell_flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        Self {
            shell: shell.to_string(),
            shell_flag: shell_flag.to_string(),
            command_timeout_secs: None,
            state_file: home_dir().join(".config/lian-mirror/state.json"),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        home_dir().join(".config/lian-mirror/config.toml")
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config = Self::from_toml(&content)?;
            log::info!("已加载配置: {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn command_timeout(&self) -> Option<std::time::Duration> {
        self.command_timeout_secs.map(std::time::Duration::from_secs)
    }
}
