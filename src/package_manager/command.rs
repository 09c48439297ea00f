//! 拼接 registry 读写命令

use super::PackageManager;

/// 启动时查询 registry 的命令，固定针对 npm
const GET_REGISTRY_COMMAND: &str = "npm config get registry";

/// 获取切换镜像的命令。
///
/// `registry_url` 不做任何 shell 转义：调用方只会传入内置镜像列表中的地址。
/// 如果要接受任意地址，必须先转义再拼进命令行。
pub fn build_set_command(manager: PackageManager, registry_url: &str) -> String {
    format!("{} config set registry {}", manager.name(), registry_url)
}

pub fn build_get_command() -> &'static str {
    GET_REGISTRY_COMMAND
}
