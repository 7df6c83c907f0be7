use decorflow::ClientConfig;

/// 构建期配置，未设置时使用核心库的默认值
///
/// 可通过环境变量或 `frontend/.env` 提供（见 `build.rs`）。
pub fn client_config() -> ClientConfig {
    ClientConfig::from_overrides(
        option_env!("DECORFLOW_API_BASE"),
        option_env!("DECORFLOW_LOG_LEVEL"),
    )
}
