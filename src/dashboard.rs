use crate::route::AppRoute;
use crate::session::{Session, SessionService, SessionStore};

const MISSING: &str = "—";

/// 控制面板展示的会话信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub token: String,
    pub shop_id: String,
    pub shop_name: String,
}

impl DashboardSummary {
    pub fn from_session(session: &Session) -> Self {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());
        Self {
            token: show(&session.token),
            shop_id: show(&session.selected_shop_id),
            shop_name: show(&session.selected_shop_name),
        }
    }
}

/// 面板上的 "Sign Out"：清除会话并返回登录页路由
pub fn sign_out<S: SessionStore>(session: &SessionService<S>) -> AppRoute {
    crate::auth::sign_out(session);
    AppRoute::auth_failure_redirect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use decorflow_shared::Shop;

    #[test]
    fn summary_shows_placeholders_for_missing_values() {
        let summary = DashboardSummary::from_session(&Session {
            token: Some("tok".into()),
            ..Session::default()
        });
        assert_eq!(summary.token, "tok");
        assert_eq!(summary.shop_id, "—");
        assert_eq!(summary.shop_name, "—");
    }

    #[test]
    fn sign_out_then_dashboard_visit_redirects_to_login() {
        let session = SessionService::new(MemoryStore::new());
        session.set_token("tok").unwrap();
        session
            .select_shop(&Shop {
                id: "42".into(),
                saved_by: "admin".into(),
                shop_name: "Downtown".into(),
            })
            .unwrap();

        let next = sign_out(&session);

        assert_eq!(next, AppRoute::Login);
        let is_auth = session.load().is_authenticated();
        assert_eq!(AppRoute::Dashboard.guard(is_auth), AppRoute::Login);
        assert_eq!(session.load(), Session::default());
    }
}
