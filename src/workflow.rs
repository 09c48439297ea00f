//! 切换镜像流程：选择包管理器 → 选择镜像源 → 执行 → 记录 → 更新状态栏

use crate::package_manager::{
    build_set_command, run_async, CommandRunner, ExecutionError, PackageManager, RegistryOption,
};
use crate::status::StatusIndicator;
use crate::store::PreferenceStore;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// 用户在选择框中的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    Selected(T),
    Cancelled,
}

/// 一次待执行的切换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    pub manager: PackageManager,
    pub option: RegistryOption,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchPhase {
    Idle,
    PickingManager,
    PickingRegistry(PackageManager),
    Executing(SwitchRequest),
}

/// 每次选择后流程的下一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Cancelled,
    Execute(SwitchRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notification {
    fn new(level: NoticeLevel, message: String) -> Self {
        Self {
            level,
            message,
            at: Local::now(),
        }
    }
}

/// 流程状态 + 状态栏 + 镜像记录。由 main 创建一次后传入 TUI。
pub struct Workflow<S: PreferenceStore> {
    store: S,
    status: StatusIndicator,
    phase: SwitchPhase,
    /// 本次运行中是否已成功切换过
    switched: bool,
}

impl<S: PreferenceStore> Workflow<S> {
    pub fn new(store: S, status: StatusIndicator) -> Self {
        Self {
            store,
            status,
            phase: SwitchPhase::Idle,
            switched: false,
        }
    }

    pub fn phase(&self) -> &SwitchPhase {
        &self.phase
    }

    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 触发切换指令。上一次执行尚未结束时也允许重新开始。
    pub fn begin(&mut self) {
        if let SwitchPhase::Executing(request) = &self.phase {
            log::debug!("上一次切换仍在执行: {}", request.command);
        }
        self.phase = SwitchPhase::PickingManager;
    }

    pub fn choose_manager(&mut self, selection: Selection<PackageManager>) -> Step {
        if self.phase != SwitchPhase::PickingManager {
            return Step::Continue;
        }
        match selection {
            Selection::Selected(manager) => {
                self.phase = SwitchPhase::PickingRegistry(manager);
                Step::Continue
            }
            Selection::Cancelled => {
                self.phase = SwitchPhase::Idle;
                Step::Cancelled
            }
        }
    }

    pub fn choose_registry(&mut self, selection: Selection<RegistryOption>) -> Step {
        let SwitchPhase::PickingRegistry(manager) = self.phase else {
            return Step::Continue;
        };
        match selection {
            Selection::Selected(option) => {
                let request = SwitchRequest {
                    manager,
                    option,
                    command: build_set_command(manager, option.url),
                };
                self.phase = SwitchPhase::Executing(request.clone());
                Step::Execute(request)
            }
            Selection::Cancelled => {
                self.phase = SwitchPhase::Idle;
                Step::Cancelled
            }
        }
    }

    /// 命令执行结束：成功则记录并刷新状态栏，失败只提示
    pub fn finish(
        &mut self,
        request: &SwitchRequest,
        result: Result<String, ExecutionError>,
    ) -> Notification {
        if matches!(&self.phase, SwitchPhase::Executing(pending) if pending == request) {
            self.phase = SwitchPhase::Idle;
        }

        match result {
            Ok(_) => {
                let url = request.option.url;
                // 命令已生效，记录失败不影响状态栏
                if let Err(e) = self.store.set(url) {
                    log::warn!("保存镜像记录失败: {:#}", e);
                }
                self.switched = true;
                self.status.render(Some(url));
                log::info!("{} registry 已切换为 {}", request.manager, url);
                Notification::new(NoticeLevel::Info, format!("切换成功，镜像地址：{url}"))
            }
            Err(e) => {
                log::error!("切换镜像失败: {}", e);
                Notification::new(
                    NoticeLevel::Error,
                    format!("切换镜像失败，请确认已安装{}", request.manager),
                )
            }
        }
    }

    /// 启动检测结果：优先真实 registry，否则用上一次记录。
    /// 若检测返回前已经切换成功，丢弃这个更旧的结果。
    pub fn apply_detected(&mut self, detected: Option<String>) {
        if self.switched {
            log::debug!("已切换过镜像，忽略启动检测结果");
            return;
        }
        let registry = detected.or_else(|| self.store.get());
        self.status.render(registry.as_deref());
    }
}

/// 执行切换命令
pub async fn execute(
    runner: Arc<dyn CommandRunner>,
    request: &SwitchRequest,
) -> Result<String, ExecutionError> {
    run_async(runner, request.command.clone()).await
}
