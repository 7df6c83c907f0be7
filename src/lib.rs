//! DecorFlow 客户端核心
//!
//! 与平台无关的登录 / 选店 / 面板流程：
//! - `request`: HTTP 传输抽象（浏览器 fetch、reqwest、测试 mock）
//! - `session`: 会话存储与会话服务
//! - `api`: 带 Bearer 认证头的 API 客户端
//! - `auth`: 登录状态机与注销
//! - `shops`: 门店目录与门店选择
//! - `route`: 路由与守卫
//! - `dashboard`: 面板展示数据
//! - `cancel`: 随界面卸载而取消的网络任务

pub mod api;
pub mod auth;
pub mod cancel;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod request;
pub mod route;
pub mod session;
pub mod shops;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, SignInError, StoreError};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::AppRoute;
pub use session::{MemoryStore, Session, SessionService, SessionStore};

pub use decorflow_shared::{Credentials, SessionToken, Shop};
