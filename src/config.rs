use log::Level;
use std::str::FromStr;

/// 默认值，构建时未提供覆盖项时使用
pub const DEFAULT_API_BASE: &str = "https://api.yashhomedecors.com:8080";
pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端地址，不带结尾的 `/`
    pub base_url: String,
    pub log_level: Level,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    /// 应用可选的覆盖值，空白或无法解析的值回退到默认值
    ///
    /// 前端通过 `option_env!` 在编译期取得这些值。
    pub fn from_overrides(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE);

        let mut config = Self::new(base_url);
        if let Some(level) = log_level {
            match Level::from_str(level.trim()) {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("ignoring invalid log level override `{}`", level),
            }
        }
        config
    }

    /// 拼接完整 URL，保证中间只有一个 `/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
