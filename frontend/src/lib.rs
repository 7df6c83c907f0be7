//! DecorFlow 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web::router`: 路由服务（守卫规则来自 `decorflow::route`）
//! - `auth`: 会话上下文（API 客户端 + 会话快照）
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod dashboard;
    mod icons;
    pub mod login;
    pub mod shop_selection;
}
mod config;

use crate::auth::SessionContext;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;

pub use crate::config::client_config;

use decorflow::ClientConfig;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器 fetch / localStorage / history 的轻量级封装，分别实现核心库的特性。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
}

use decorflow::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // 1. 创建会话上下文（从 LocalStorage 加载已有会话）
    let session_ctx = SessionContext::new(config);
    provide_context(session_ctx);

    // 2. 认证信号注入路由服务，路由不直接依赖会话
    let is_authenticated = session_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
