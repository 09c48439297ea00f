//! 状态栏镜像指示器

use crate::package_manager::Label;

const ICON: &str = "☁";
const PREFIX: &str = "NPM：";
const NO_REGISTRY_TOOLTIP: &str = "未获取到 registry";

/// 常驻状态栏项，只保存当前显示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    text: String,
    tooltip: String,
    label: Label,
}

impl StatusIndicator {
    /// 新建时处于“未知”状态
    pub fn new() -> Self {
        let mut indicator = Self {
            text: String::new(),
            tooltip: String::new(),
            label: Label::Unknown,
        };
        indicator.render(None);
        indicator
    }

    /// 更新状态栏
    pub fn render(&mut self, registry: Option<&str>) {
        let registry = registry.filter(|r| !r.is_empty());
        self.label = Label::classify(registry);
        self.text = format!("{ICON} {PREFIX}{}", self.label);
        self.tooltip = match registry {
            Some(url) => format!("当前镜像地址：{url}"),
            None => NO_REGISTRY_TOOLTIP.to_string(),
        };
        log::debug!("状态栏更新: {} ({:?})", self.label.key(), registry);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let indicator = StatusIndicator::new();
        assert_eq!(indicator.label(), Label::Unknown);
        assert_eq!(indicator.text(), "☁ NPM：未知");
        assert_eq!(indicator.tooltip(), "未获取到 registry");
    }

    #[test]
    fn renders_label_and_address() {
        let mut indicator = StatusIndicator::new();
        indicator.render(Some("https://registry.npmmirror.com"));
        assert_eq!(indicator.text(), "☁ NPM：阿里云");
        assert_eq!(
            indicator.tooltip(),
            "当前镜像地址：https://registry.npmmirror.com"
        );
    }

    #[test]
    fn render_is_idempotent() {
        let mut indicator = StatusIndicator::new();
        indicator.render(Some("https://my.company.internal/npm"));
        let first = indicator.clone();
        indicator.render(Some("https://my.company.internal/npm"));
        assert_eq!(indicator, first);
        assert_eq!(indicator.label(), Label::Custom);
    }

    #[test]
    fn rendering_none_after_a_value_resets_to_unknown() {
        let mut indicator = StatusIndicator::new();
        indicator.render(Some("https://registry.npmjs.org"));
        indicator.render(None);
        assert_eq!(indicator, StatusIndicator::new());
    }
}
