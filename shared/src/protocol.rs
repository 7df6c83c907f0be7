use crate::{Credentials, SessionToken, Shop};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Parse the raw response body.
    fn parse_response(body: &str) -> Result<Self::Response, String>;
}

// =========================================================
// Request Definitions
// =========================================================

/// Sign in. The body is the credentials object itself.
impl ApiRequest for Credentials {
    type Response = SessionToken;
    const PATH: &'static str = "/api/auth/sign-in";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn parse_response(body: &str) -> Result<SessionToken, String> {
        SessionToken::from_response_body(body)
            .ok_or_else(|| "sign-in response did not contain a session token".to_string())
    }
}

/// List every shop visible to the signed-in user
#[derive(Debug, Serialize, Deserialize)]
pub struct ListShopsRequest;

impl ApiRequest for ListShopsRequest {
    type Response = Vec<Shop>;
    const PATH: &'static str = "/api/shop/get-all-shops";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(body: &str) -> Result<Vec<Shop>, String> {
        serde_json::from_str(body).map_err(|e| e.to_string())
    }
}
