//! 镜像源相关数据类型定义

use std::fmt;

/// 可选镜像源条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOption {
    pub label: &'static str,
    pub url: &'static str,
}

/// 固定的镜像源列表（顺序即为选择列表的顺序）
pub const REGISTRY_OPTIONS: [RegistryOption; 2] = [
    RegistryOption {
        label: "阿里云镜像",
        url: "https://registry.npmmirror.com",
    },
    RegistryOption {
        label: "官方镜像",
        url: "https://registry.npmjs.org",
    },
];

const ALIYUN_HOST: &str = "npmmirror.com";
const OFFICIAL_HOST: &str = "npmjs.org";

/// 状态栏上显示的镜像分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Unknown,
    Aliyun,
    Official,
    Custom,
}

impl Label {
    /// registry → 分类。按子串匹配，阿里云优先于官方。
    pub fn classify(registry: Option<&str>) -> Self {
        match registry {
            None | Some("") => Label::Unknown,
            Some(url) if url.contains(ALIYUN_HOST) => Label::Aliyun,
            Some(url) if url.contains(OFFICIAL_HOST) => Label::Official,
            Some(_) => Label::Custom,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Label::Unknown => "unknown",
            Label::Aliyun => "aliyun",
            Label::Official => "official",
            Label::Custom => "custom",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Label::Unknown => "未知",
            Label::Aliyun => "阿里云",
            Label::Official => "官方",
            Label::Custom => "自定义",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_registry_is_unknown() {
        assert_eq!(Label::classify(None), Label::Unknown);
        assert_eq!(Label::classify(Some("")), Label::Unknown);
        assert_eq!(Label::classify(None).key(), "unknown");
    }

    #[test]
    fn known_hosts_match_by_substring() {
        assert_eq!(
            Label::classify(Some("https://registry.npmmirror.com/")).key(),
            "aliyun"
        );
        assert_eq!(
            Label::classify(Some("https://registry.npmjs.org")).key(),
            "official"
        );
        assert_eq!(
            Label::classify(Some("http://registry.npmjs.org:80/some/path")),
            Label::Official
        );
    }

    #[test]
    fn other_hosts_are_custom() {
        assert_eq!(
            Label::classify(Some("https://my.company.internal/npm")).key(),
            "custom"
        );
    }

    #[test]
    fn aliyun_wins_when_both_hosts_appear() {
        let both = "https://registry.npmjs.org.npmmirror.com/";
        assert_eq!(Label::classify(Some(both)), Label::Aliyun);
    }

    #[test]
    fn catalog_entries_classify_to_their_own_label() {
        assert_eq!(Label::classify(Some(REGISTRY_OPTIONS[0].url)), Label::Aliyun);
        assert_eq!(Label::classify(Some(REGISTRY_OPTIONS[1].url)), Label::Official);
    }

    #[test]
    fn display_text_is_user_facing() {
        assert_eq!(Label::Aliyun.to_string(), "阿里云");
        assert_eq!(Label::Unknown.to_string(), "未知");
    }
}
