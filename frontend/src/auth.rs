//! 认证模块
//!
//! 持有 API 客户端和会话快照信号，通过 Context 在组件间共享。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::web::{FetchHttpClient, LocalStorage};
use decorflow::route::AppRoute;
use decorflow::{ApiClient, ClientConfig, Session, SessionService};
use leptos::prelude::*;

pub type Api = ApiClient<FetchHttpClient, LocalStorage>;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    api: StoredValue<Api>,
    /// localStorage 中会话的镜像，每次写入后刷新
    session: RwSignal<Session>,
}

impl SessionContext {
    /// 创建会话上下文，并从 LocalStorage 加载已有会话
    pub fn new(config: ClientConfig) -> Self {
        let service = SessionService::new(LocalStorage);
        let initial = service.load();
        let api = ApiClient::new(config, FetchHttpClient, service);

        Self {
            api: StoredValue::new(api),
            session: RwSignal::new(initial),
        }
    }

    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn session(&self) -> ReadSignal<Session> {
        self.session.read_only()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 重新读取持久化的会话
    pub fn refresh(&self) {
        let current = self.api.with_value(|api| api.session().load());
        self.session.set(current);
    }

    /// 注销并清除全部会话字段，返回应跳转的路由
    pub fn sign_out(&self) -> AppRoute {
        let next = self
            .api
            .with_value(|api| decorflow::dashboard::sign_out(api.session()));
        self.refresh();
        next
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
