use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::{SessionService, SessionStore};
use decorflow_shared::{
    ApiRequest, BEARER_PREFIX, CONTENT_TYPE_JSON, Credentials, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE, ListShopsRequest, SessionToken, Shop,
};

/// 后端 API 客户端
///
/// 每次发送请求时才从会话中读取令牌，因此客户端创建之后才获得的令牌同样生效。
#[derive(Debug, Clone)]
pub struct ApiClient<C, S> {
    config: ClientConfig,
    http: C,
    session: SessionService<S>,
}

impl<C: HttpClient, S: SessionStore> ApiClient<C, S> {
    pub fn new(config: ClientConfig, http: C, session: SessionService<S>) -> Self {
        Self {
            config,
            http,
            session,
        }
    }

    pub fn session(&self) -> &SessionService<S> {
        &self.session
    }

    /// 发送一次请求
    ///
    /// 非 2xx 响应转换为 `ApiError::Status`，状态码与响应体原样保留。
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let mut req = HttpRequest::new(&self.config.url(path), method);

        if let Some(body) = body {
            req = req
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }

        // 认证头
        if let Some(token) = self.session.token() {
            req = req.with_header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            );
        }

        log::debug!("{} {}", method.as_str(), req.url);
        let res = self.http.send(req).await?;

        if !res.ok() {
            return Err(ApiError::Status {
                status: res.status,
                body: res.body,
            });
        }
        Ok(res)
    }

    /// 按 `ApiRequest` 描述的路径与方法发送，并解析响应
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let body = match R::METHOD {
            HttpMethod::Get => None,
            _ => Some(
                serde_json::to_value(request).map_err(|e| ApiError::RequestBuild(e.to_string()))?,
            ),
        };

        let res = self.request(R::METHOD, R::PATH, body).await?;
        R::parse_response(&res.body).map_err(ApiError::Decode)
    }

    /// 登录，返回会话令牌（不负责持久化）
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        self.call(credentials).await
    }

    /// 获取全部门店
    pub async fn list_shops(&self) -> Result<Vec<Shop>, ApiError> {
        self.call(&ListShopsRequest).await
    }
}
