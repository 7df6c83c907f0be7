//! 门店目录与门店选择

use crate::api::ApiClient;
use crate::error::StoreError;
use crate::request::HttpClient;
use crate::session::{SessionService, SessionStore};
use decorflow_shared::Shop;

pub const NO_SHOPS_MESSAGE: &str = "No shops available";

/// 拉取门店列表
///
/// 失败只记录日志并返回空列表，界面随之显示 "No shops available"。
pub async fn fetch_shops<C, S>(api: &ApiClient<C, S>) -> Vec<Shop>
where
    C: HttpClient,
    S: SessionStore,
{
    match api.list_shops().await {
        Ok(shops) => {
            log::info!("Loaded {} shops", shops.len());
            shops
        }
        Err(e) => {
            log::error!("Failed to fetch shops: {}", e);
            Vec::new()
        }
    }
}

/// 选择门店
///
/// 严格按顺序同步执行：写入会话 -> 调用 `on_select(id)` -> 调用 `dismiss()`。
/// 写入失败时不会调用后两者。
pub fn select_shop<S, F, D>(
    session: &SessionService<S>,
    shop: &Shop,
    on_select: F,
    dismiss: D,
) -> Result<(), StoreError>
where
    S: SessionStore,
    F: FnOnce(&str),
    D: FnOnce(),
{
    session.select_shop(shop)?;
    log::info!("Selected shop {} ({})", shop.id, shop.shop_name);
    on_select(&shop.id);
    dismiss();
    Ok(())
}

/// 弹窗是否正从隐藏变为可见
///
/// `previous` 为上一次观察到的可见状态（首次为 `None`）。只有这一转变才触发拉取。
pub fn is_opening(previous: Option<bool>, visible: bool) -> bool {
    visible && previous != Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::request::MockHttpClient;
    use crate::session::MemoryStore;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SHOPS_URL: &str = "http://api.test/api/shop/get-all-shops";

    fn signed_in() -> (
        Rc<MockHttpClient>,
        MemoryStore,
        ApiClient<Rc<MockHttpClient>, MemoryStore>,
    ) {
        let mock = Rc::new(MockHttpClient::new());
        let store = MemoryStore::new();
        let session = SessionService::new(store.clone());
        session.set_token("tok").unwrap();
        let api = ApiClient::new(ClientConfig::new("http://api.test"), mock.clone(), session);
        (mock, store, api)
    }

    fn downtown() -> Shop {
        Shop {
            id: "42".into(),
            saved_by: "admin".into(),
            shop_name: "Downtown".into(),
        }
    }

    #[tokio::test]
    async fn fetch_sends_bearer_token_and_parses_list() {
        let (mock, _, api) = signed_in();
        mock.mock_json(
            SHOPS_URL,
            200,
            json!([
                { "id": "42", "savedBy": "admin", "shopName": "Downtown" },
                { "id": "43", "savedBy": "admin", "shopName": "Uptown" }
            ]),
        );

        let shops = fetch_shops(&api).await;

        assert_eq!(shops.len(), 2);
        assert_eq!(shops[1].shop_name, "Uptown");
        let req = mock.last_request().unwrap();
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn failed_fetch_yields_empty_list() {
        let (mock, _, api) = signed_in();
        mock.mock_error(SHOPS_URL, ApiError::Network("offline".into()));
        assert!(fetch_shops(&api).await.is_empty());

        mock.mock_response(SHOPS_URL, 500, "boom");
        assert!(fetch_shops(&api).await.is_empty());
        assert_eq!(mock.request_count(), 2);
    }

    #[test]
    fn only_the_hidden_to_visible_transition_opens() {
        assert!(is_opening(None, true));
        assert!(is_opening(Some(false), true));
        assert!(!is_opening(None, false));
        assert!(!is_opening(Some(true), true));
        assert!(!is_opening(Some(true), false));
    }

    #[test]
    fn select_shop_persists_then_continues_then_dismisses() {
        let (_, store, api) = signed_in();
        let events = RefCell::new(Vec::new());

        select_shop(
            api.session(),
            &downtown(),
            |id| {
                // 回调执行时会话已经写入
                assert_eq!(store.get("selectedShopId").as_deref(), Some("42"));
                events.borrow_mut().push(format!("select:{}", id));
            },
            || events.borrow_mut().push("dismiss".to_string()),
        )
        .unwrap();

        assert_eq!(events.into_inner(), vec!["select:42", "dismiss"]);
        assert_eq!(store.get("selectedShopName").as_deref(), Some("Downtown"));
    }

    /// 只拒绝写入门店名称的存储
    struct NameRejectingStore(MemoryStore);

    impl SessionStore for NameRejectingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == "selectedShopName" {
                return Err(StoreError::Unavailable);
            }
            self.0.set(key, value)
        }
        fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.0.delete(key)
        }
    }

    #[test]
    fn failed_write_skips_continuation_and_leaves_no_partial_selection() {
        let store = MemoryStore::new();
        let session = SessionService::new(NameRejectingStore(store.clone()));
        let called = RefCell::new(false);

        let result = select_shop(
            &session,
            &downtown(),
            |_| *called.borrow_mut() = true,
            || *called.borrow_mut() = true,
        );

        assert_eq!(result, Err(StoreError::Unavailable));
        assert!(!called.into_inner());
        assert_eq!(session.load().selected_shop_id, None);
        assert!(store.is_empty());
    }
}
