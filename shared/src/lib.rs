use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

pub use protocol::{ApiRequest, HttpMethod, ListShopsRequest};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 本地持久化的会话键
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const SELECTED_SHOP_ID: &str = "selectedShopId";
    pub const SELECTED_SHOP_NAME: &str = "selectedShopName";

    /// 旧版本组件写入过的键，注销时一并清除
    pub const LEGACY_SHOP_ID: &str = "ShopId";
    pub const LEGACY_SHOP_NAME: &str = "ShopName";

    pub const ALL: [&str; 5] = [
        TOKEN,
        SELECTED_SHOP_ID,
        SELECTED_SHOP_NAME,
        LEGACY_SHOP_ID,
        LEGACY_SHOP_NAME,
    ];
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 门店 / 分店
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub saved_by: String,
    pub shop_name: String,
}

const BRANCH_ICONS: [&str; 3] = [
    "https://ik.imagekit.io/yhd/DecorFlow/Icons/Shop-Branch-1.png",
    "https://ik.imagekit.io/yhd/DecorFlow/Icons/Shop-Branch-2.png",
    "https://ik.imagekit.io/yhd/DecorFlow/Icons/Shop-Branch-3.png",
];

impl Shop {
    /// 卡片图标，按列表下标循环选取
    pub fn icon_url(index: usize) -> &'static str {
        BRANCH_ICONS[index % BRANCH_ICONS.len()]
    }

    /// 卡片标题；门店名为空时回退为 "Branch <n>"（从 1 开始）
    pub fn display_name(&self, index: usize) -> String {
        let name = self.shop_name.trim();
        if name.is_empty() {
            format!("Branch {}", index + 1)
        } else {
            name.to_string()
        }
    }
}

/// 登录凭据，只在一次提交期间存在，从不持久化
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 不透明的会话令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

const TOKEN_FIELDS: [&str; 4] = ["token", "accessToken", "access_token", "jwt"];

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从登录响应体中提取令牌
    ///
    /// 依次接受：JSON 字符串字面量、带 `token` / `accessToken` /
    /// `access_token` / `jwt` 字段的 JSON 对象、JSON 数字（取其文本形式）
    /// 以及非 JSON 的原始文本。
    pub fn from_response_body(body: &str) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(s)) => non_empty(&s),
            Ok(serde_json::Value::Number(n)) => non_empty(&n.to_string()),
            Ok(serde_json::Value::Object(map)) => TOKEN_FIELDS
                .iter()
                .filter_map(|field| map.get(*field).and_then(|v| v.as_str()))
                .find_map(non_empty),
            Ok(_) => None,
            // 后端直接返回纯文本令牌
            Err(_) => non_empty(body),
        }
    }
}

fn non_empty(s: &str) -> Option<SessionToken> {
    let s = s.trim();
    (!s.is_empty()).then(|| SessionToken(s.to_string()))
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
