mod config;
mod package_manager;
mod status;
mod store;
mod tui;
mod workflow;

use anyhow::Result;
use package_manager::{CommandRunner, ShellRunner};
use status::StatusIndicator;
use std::sync::Arc;
use store::FileStore;
use workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 加载配置
    let config = config::Config::load_or_default()?;
    if config.command_timeout_secs.is_some() {
        log::info!("命令超时: {:?}", config.command_timeout());
    }

    let runner: Arc<dyn CommandRunner> = Arc::new(
        ShellRunner::new(config.shell.clone(), config.shell_flag.clone())
            .with_timeout(config.command_timeout()),
    );

    // 状态栏与镜像记录只在这里创建一次
    let store = FileStore::new(config.state_file.clone());
    let workflow = Workflow::new(store, StatusIndicator::new());

    tui::run(workflow, runner).await?;

    Ok(())
}
