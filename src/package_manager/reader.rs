//! 读取当前 registry（启动时用）

use super::command::build_get_command;
use super::runner::{run_async, CommandRunner};
use std::sync::Arc;

/// 查询 npm 当前 registry。
///
/// 尽力而为：命令失败或输出为空都返回 `None`，不向上抛错。
pub async fn current_registry(runner: Arc<dyn CommandRunner>) -> Option<String> {
    match run_async(runner, build_get_command().to_string()).await {
        Ok(stdout) => {
            let registry = stdout.trim();
            if registry.is_empty() {
                log::info!("npm 未返回 registry");
                None
            } else {
                Some(registry.to_string())
            }
        }
        Err(e) => {
            log::info!("获取当前 registry 失败，将使用上一次记录: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::runner::fake::FakeRunner;

    #[tokio::test]
    async fn output_is_trimmed() {
        let runner = Arc::new(FakeRunner::succeeding("  https://registry.npmjs.org/\n"));
        let registry = current_registry(runner.clone()).await;

        assert_eq!(registry.as_deref(), Some("https://registry.npmjs.org/"));
        assert_eq!(runner.calls(), vec!["npm config get registry".to_string()]);
    }

    #[tokio::test]
    async fn failure_degrades_to_none() {
        let runner = Arc::new(FakeRunner::failing());
        assert_eq!(current_registry(runner).await, None);
    }

    #[tokio::test]
    async fn blank_output_is_none() {
        let runner = Arc::new(FakeRunner::succeeding("\n"));
        assert_eq!(current_registry(runner).await, None);
    }
}
