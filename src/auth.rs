//! 认证模块
//!
//! 登录流程：`Unauthenticated -> Submitting -> (Authenticated | Failed)`。
//! 令牌先写入会话，调用方随后才展示门店选择。

use crate::api::ApiClient;
use crate::error::SignInError;
use crate::request::HttpClient;
use crate::session::{SessionService, SessionStore};
use decorflow_shared::Credentials;

/// HTTP 层失败时展示给用户的固定提示
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password. Please try again.";

/// 登录阶段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Unauthenticated,
    Submitting,
    Authenticated,
    /// 未认证且带有错误提示，可重新提交
    Failed { message: String },
}

impl AuthPhase {
    /// 是否允许发起新的提交（同一时间最多一个登录请求）
    pub fn can_submit(&self) -> bool {
        !matches!(self, AuthPhase::Submitting)
    }

    /// 进入 `Submitting`；已在提交中时拒绝并返回 `false`
    pub fn start_submission(&mut self) -> bool {
        if !self.can_submit() {
            log::warn!("Sign-in already in progress, ignoring submission");
            return false;
        }
        *self = AuthPhase::Submitting;
        true
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, AuthPhase::Submitting)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthPhase::Authenticated)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthPhase::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// 根据一次登录的结果计算下一个阶段
    pub fn resolve(outcome: &Result<(), SignInError>) -> Self {
        match outcome {
            Ok(()) => AuthPhase::Authenticated,
            Err(SignInError::Rejected(e)) => {
                log::error!("Failed to log in: {}", e);
                AuthPhase::Failed {
                    message: INVALID_CREDENTIALS_MESSAGE.to_string(),
                }
            }
            Err(SignInError::Unexpected(e)) => {
                log::error!("Unexpected error during sign-in: {}", e);
                AuthPhase::Unauthenticated
            }
        }
    }
}

/// 提交凭据并持久化令牌
///
/// 返回 `Ok` 时令牌已经写入会话；失败时会话保持不变。
pub async fn sign_in<C, S>(
    api: &ApiClient<C, S>,
    credentials: &Credentials,
) -> Result<(), SignInError>
where
    C: HttpClient,
    S: SessionStore,
{
    let token = api.sign_in(credentials).await?;
    api.session().set_token(token.as_str())?;
    log::info!("Signed in as {}", credentials.username);
    Ok(())
}

/// 登录并给出结束后的阶段
pub async fn authenticate<C, S>(api: &ApiClient<C, S>, credentials: &Credentials) -> AuthPhase
where
    C: HttpClient,
    S: SessionStore,
{
    AuthPhase::resolve(&sign_in(api, credentials).await)
}

/// 注销：清除全部会话字段
pub fn sign_out<S: SessionStore>(session: &SessionService<S>) {
    match session.clear() {
        Ok(()) => log::info!("Signed out"),
        Err(e) => log::error!("Failed to clear session on sign-out: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::{ApiError, StoreError};
    use crate::request::MockHttpClient;
    use crate::session::MemoryStore;
    use std::rc::Rc;

    const SIGN_IN_URL: &str = "http://api.test/api/auth/sign-in";

    fn api_with(
        store: MemoryStore,
    ) -> (Rc<MockHttpClient>, ApiClient<Rc<MockHttpClient>, MemoryStore>) {
        let mock = Rc::new(MockHttpClient::new());
        let api = ApiClient::new(
            ClientConfig::new("http://api.test"),
            mock.clone(),
            SessionService::new(store),
        );
        (mock, api)
    }

    #[tokio::test]
    async fn success_persists_token_and_authenticates() {
        let store = MemoryStore::new();
        let (mock, api) = api_with(store.clone());
        mock.mock_response(SIGN_IN_URL, 200, "tok-1");

        let phase = authenticate(&api, &Credentials::new("alice", "pw")).await;

        assert_eq!(phase, AuthPhase::Authenticated);
        assert_eq!(store.get("token").as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn success_clears_previous_error() {
        let (mock, api) = api_with(MemoryStore::new());
        let mut phase = AuthPhase::Unauthenticated;

        mock.mock_response(SIGN_IN_URL, 401, "nope");
        assert!(phase.start_submission());
        phase = authenticate(&api, &Credentials::new("alice", "bad")).await;
        assert!(phase.error_message().is_some());

        mock.mock_response(SIGN_IN_URL, 200, "tok-2");
        assert!(phase.start_submission());
        assert_eq!(phase.error_message(), None);
        phase = authenticate(&api, &Credentials::new("alice", "good")).await;
        assert_eq!(phase, AuthPhase::Authenticated);
        assert_eq!(phase.error_message(), None);
    }

    #[tokio::test]
    async fn http_failures_show_fixed_message_and_keep_token() {
        let failures = [
            ApiError::Status {
                status: 401,
                body: "Bad credentials".into(),
            },
            ApiError::Status {
                status: 500,
                body: "boom".into(),
            },
            ApiError::Network("offline".into()),
        ];

        for failure in failures {
            let store = MemoryStore::new();
            store.set("token", "previous").unwrap();
            let (mock, api) = api_with(store.clone());
            mock.mock_error(SIGN_IN_URL, failure);

            let phase = authenticate(&api, &Credentials::new("alice", "pw")).await;

            assert_eq!(phase.error_message(), Some(INVALID_CREDENTIALS_MESSAGE));
            assert!(phase.can_submit());
            assert_eq!(store.get("token").as_deref(), Some("previous"));
            assert_eq!(mock.request_count(), 1);
        }
    }

    #[tokio::test]
    async fn empty_token_body_is_rejected() {
        let store = MemoryStore::new();
        let (mock, api) = api_with(store.clone());
        mock.mock_response(SIGN_IN_URL, 200, "   ");

        let phase = authenticate(&api, &Credentials::new("alice", "pw")).await;

        assert_eq!(phase.error_message(), Some(INVALID_CREDENTIALS_MESSAGE));
        assert!(store.is_empty());
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            })
        }
        fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failure_is_unexpected_and_not_surfaced() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(SIGN_IN_URL, 200, "tok");
        let api = ApiClient::new(
            ClientConfig::new("http://api.test"),
            mock.clone(),
            SessionService::new(FailingStore),
        );

        let outcome = sign_in(&api, &Credentials::new("a", "b")).await;
        assert!(matches!(outcome, Err(SignInError::Unexpected(_))));
        assert_eq!(AuthPhase::resolve(&outcome), AuthPhase::Unauthenticated);
    }

    #[test]
    fn start_submission_refuses_while_submitting() {
        let mut phase = AuthPhase::Unauthenticated;
        assert!(phase.start_submission());
        assert!(phase.is_submitting());

        assert!(!phase.start_submission());
        assert_eq!(phase, AuthPhase::Submitting);

        let mut failed = AuthPhase::Failed {
            message: "x".into(),
        };
        assert!(failed.start_submission());
        assert_eq!(failed.error_message(), None);
    }

    #[test]
    fn sign_out_clears_session() {
        let store = MemoryStore::new();
        let session = SessionService::new(store.clone());
        session.set_token("t").unwrap();
        store.set("selectedShopId", "42").unwrap();
        store.set("selectedShopName", "Downtown").unwrap();

        sign_out(&session);

        assert!(store.is_empty());
        assert!(!session.load().is_authenticated());
    }
}
