//! 包管理器模块 — 对 npm / pnpm / yarn 的 registry 配置封装

pub mod command;
pub mod reader;
pub mod runner;
pub mod types;

// 重新导出常用类型和函数
pub use command::build_set_command;
pub use reader::current_registry;
pub use runner::{run_async, CommandRunner, ExecutionError, ShellRunner};
pub use types::{Label, RegistryOption, REGISTRY_OPTIONS};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

#[derive(Debug, Error, PartialEq)]
#[error("不支持的包管理器: {0}")]
pub struct UnknownPackageManager(pub String);

impl PackageManager {
    /// 选择列表的固定顺序
    pub const ALL: [PackageManager; 3] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageManager::ALL
            .into_iter()
            .find(|pm| pm.name() == s)
            .ok_or_else(|| UnknownPackageManager(s.to_string()))
    }
}
