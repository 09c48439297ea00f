use crate::package_manager::{ExecutionError, PackageManager, REGISTRY_OPTIONS};
use crate::store::PreferenceStore;
use crate::workflow::{NoticeLevel, Notification, SwitchPhase, SwitchRequest, Workflow};

/// 提示在状态栏停留的秒数
const NOTICE_TTL_SECS: i64 = 6;

// ========== 事件 ==========

#[derive(Debug)]
pub enum AppEvent {
    /// 启动时的 registry 检测结果
    RegistryDetected(Option<String>),
    SwitchFinished {
        request: SwitchRequest,
        result: Result<String, ExecutionError>,
    },
}

// ========== App ==========

pub struct App<S: PreferenceStore> {
    pub workflow: Workflow<S>,
    pub manager_selected: usize,
    pub registry_selected: usize,
    pub notification: Option<Notification>,
    pub should_quit: bool,
}

impl<S: PreferenceStore> App<S> {
    pub fn new(workflow: Workflow<S>) -> Self {
        Self {
            workflow,
            manager_selected: 0,
            registry_selected: 0,
            notification: None,
            should_quit: false,
        }
    }

    /// 触发切换指令（按键或点击状态栏）
    pub fn start_switch(&mut self) {
        self.manager_selected = 0;
        self.registry_selected = 0;
        self.notification = None;
        self.workflow.begin();
    }

    pub fn is_picking(&self) -> bool {
        matches!(
            self.workflow.phase(),
            SwitchPhase::PickingManager | SwitchPhase::PickingRegistry(_)
        )
    }

    /// 当前选择框的条目数
    pub fn picker_len(&self) -> usize {
        match self.workflow.phase() {
            SwitchPhase::PickingManager => PackageManager::ALL.len(),
            SwitchPhase::PickingRegistry(_) => REGISTRY_OPTIONS.len(),
            _ => 0,
        }
    }

    pub fn picker_cursor_mut(&mut self) -> Option<&mut usize> {
        match self.workflow.phase() {
            SwitchPhase::PickingManager => Some(&mut self.manager_selected),
            SwitchPhase::PickingRegistry(_) => Some(&mut self.registry_selected),
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RegistryDetected(registry) => {
                self.workflow.apply_detected(registry);
            }
            AppEvent::SwitchFinished { request, result } => {
                let notice = self.workflow.finish(&request, result);
                self.notification = Some(notice);
            }
        }
    }

    /// 未过期的提示
    pub fn visible_notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| {
            let age = chrono::Local::now().signed_duration_since(n.at);
            // 错误提示保留到下一次操作
            n.level == NoticeLevel::Error || age.num_seconds() < NOTICE_TTL_SECS
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::{Label, RegistryOption};
    use crate::status::StatusIndicator;
    use crate::store::memory::MemoryStore;
    use crate::workflow::{Selection, Step};

    fn app() -> App<MemoryStore> {
        App::new(Workflow::new(MemoryStore::default(), StatusIndicator::new()))
    }

    fn pending_request(app: &mut App<MemoryStore>, option: RegistryOption) -> SwitchRequest {
        app.start_switch();
        app.workflow
            .choose_manager(Selection::Selected(PackageManager::Npm));
        match app.workflow.choose_registry(Selection::Selected(option)) {
            Step::Execute(request) => request,
            other => panic!("expected execute step, got {other:?}"),
        }
    }

    #[test]
    fn finished_switch_sets_notification() {
        let mut app = app();
        let request = pending_request(&mut app, REGISTRY_OPTIONS[0]);
        app.handle_event(AppEvent::SwitchFinished {
            request,
            result: Ok(String::new()),
        });

        let notice = app.visible_notification().expect("notice must be visible");
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(app.workflow.status().label(), Label::Aliyun);
    }

    #[test]
    fn old_info_notice_expires() {
        let mut app = app();
        let request = pending_request(&mut app, REGISTRY_OPTIONS[1]);
        app.handle_event(AppEvent::SwitchFinished {
            request,
            result: Ok(String::new()),
        });
        if let Some(n) = app.notification.as_mut() {
            n.at = n.at - chrono::Duration::seconds(NOTICE_TTL_SECS + 1);
        }
        assert!(app.visible_notification().is_none());
    }

    #[test]
    fn starting_a_switch_resets_cursors() {
        let mut app = app();
        app.start_switch();
        app.manager_selected = 2;
        app.start_switch();
        assert_eq!(app.manager_selected, 0);
        assert!(app.is_picking());
        assert_eq!(app.picker_len(), 3);
    }

    #[test]
    fn detection_event_renders_indicator() {
        let mut app = app();
        app.handle_event(AppEvent::RegistryDetected(Some(
            "https://registry.npmjs.org/".to_string(),
        )));
        assert_eq!(app.workflow.status().label(), Label::Official);
    }
}
