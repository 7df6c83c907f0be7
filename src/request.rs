use crate::error::ApiError;
use std::collections::HashMap;

pub use decorflow_shared::HttpMethod;

#[cfg(test)]
use futures::channel::oneshot;
#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 状态码是否为 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下 fetch 的 Future 不是 Send 的。
/// 实现只负责单次发送：不重试、不设超时、不解释状态码。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =========================================================
// 实现层: reqwest 客户端 (Native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::RequestBuild(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的一次请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // URL -> 预设结果
    responses: RefCell<HashMap<String, Result<HttpResponse, ApiError>>>,
    // URL -> 由测试决定何时到达的结果
    deferred: RefCell<HashMap<String, oneshot::Receiver<Result<HttpResponse, ApiError>>>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_json(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_response(url, status, &body.to_string());
    }

    pub fn mock_error(&self, url: &str, error: ApiError) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Err(error));
    }

    /// 请求会一直挂起，直到测试通过返回的 sender 交付结果
    pub fn mock_deferred(&self, url: &str) -> oneshot::Sender<Result<HttpResponse, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().insert(url.to_string(), rx);
        tx
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        let deferred = self.deferred.borrow_mut().remove(&req.url);
        if let Some(reply) = deferred {
            return reply
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("response never delivered".into())));
        }

        match self.responses.borrow().get(&req.url) {
            Some(result) => result.clone(),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

/// 共享同一个 mock，便于在被测对象持有客户端时仍能检查请求记录
#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for std::rc::Rc<MockHttpClient> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.as_ref().send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 只处理一个连接的简易 HTTP 服务器，返回收到的原始请求头
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_lowercase()
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn reqwest_client_sends_headers_and_reads_body() {
        let (base, server) = serve_once("200 OK", "[]").await;
        let client = ReqwestHttpClient::new();

        let req = HttpRequest::new(&format!("{}/api/shop/get-all-shops", base), HttpMethod::Get)
            .with_header("Authorization", "Bearer abc");
        let resp = client.send(req).await.unwrap();

        assert!(resp.ok());
        assert_eq!(resp.body, "[]");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("get /api/shop/get-all-shops"));
        assert!(raw.contains("authorization: bearer abc"));
    }

    #[tokio::test]
    async fn reqwest_client_passes_error_status_through() {
        let (base, server) = serve_once("401 Unauthorized", "bad credentials").await;
        let client = ReqwestHttpClient::new();

        let resp = client
            .send(HttpRequest::new(&format!("{}/api/auth/sign-in", base), HttpMethod::Post))
            .await
            .unwrap();

        assert_eq!(resp.status, 401);
        assert!(!resp.ok());
        assert_eq!(resp.body, "bad credentials");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn reqwest_client_reports_network_errors() {
        // 绑定后立即释放端口，保证连接被拒绝
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ReqwestHttpClient::new()
            .send(HttpRequest::new(&format!("http://{}/", addr), HttpMethod::Get))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn response_ok_covers_2xx_only() {
        let resp = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(resp(200).ok());
        assert!(resp(204).ok());
        assert!(!resp(302).ok());
        assert!(!resp(500).ok());
    }
}
