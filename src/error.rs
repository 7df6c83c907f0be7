use thiserror::Error;

// =========================================================
// HTTP 层错误
// =========================================================

/// API 调用错误
///
/// 这些都属于 "HTTP 层" 错误：状态码与响应体原样透传，不做解释。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求构建失败
    #[error("request could not be built: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    Network(String),
    /// 服务端返回非 2xx
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
    /// 响应解析失败
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 服务端状态码（仅 `Status` 变体有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =========================================================
// 会话存储错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// 存储后端不可用（例如浏览器禁用了 localStorage）
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

// =========================================================
// 登录错误
// =========================================================

/// 登录失败的两类原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    /// HTTP 层拒绝：向用户展示固定提示
    #[error("sign-in rejected: {0}")]
    Rejected(#[from] ApiError),
    /// 意外错误：仅记录日志
    #[error("unexpected sign-in failure: {0}")]
    Unexpected(#[from] StoreError),
}
