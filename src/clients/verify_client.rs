/// 验证服务 API 客户端
///
/// 封装获取令牌与提交结果两个接口
use crate::config::Config;
use crate::error::{ApiError, RequestFailure};
use crate::models::ResultRecord;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 验证服务能力
///
/// 编排层只依赖这个 trait，测试时可以替换为假实现
#[allow(async_fn_in_trait)]
pub trait VerificationApi {
    /// 获取授权令牌
    async fn fetch_token(&self) -> Result<String, ApiError>;

    /// 提交结果，成功时返回响应原文
    async fn submit(&self, token: &str, records: &[ResultRecord]) -> Result<String, ApiError>;
}

/// 基于 reqwest 的验证服务客户端
pub struct VerifyClient {
    client: Client,
    register_url: String,
    check_topk_url: String,
}

/// `/register` 响应体
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    data: Option<RegisterData>,
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    #[serde(rename = "authorizationToken")]
    authorization_token: Option<String>,
}

/// 提交请求体
#[derive(Debug, Serialize)]
struct SubmitPayload<'a> {
    data: &'a [ResultRecord],
}

impl VerifyClient {
    /// 创建新的验证服务客户端
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// 使用已有的 reqwest 客户端
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            register_url: config.register_url(),
            check_topk_url: config.check_topk_url(),
        }
    }

    async fn get_token(&self) -> Result<String, RequestFailure> {
        let response = self.client.get(&self.register_url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestFailure::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("令牌接口响应: {}", body);
        extract_token(&body)
    }

    async fn post_results(
        &self,
        token: &str,
        records: &[ResultRecord],
    ) -> Result<String, RequestFailure> {
        let response = self
            .client
            .post(&self.check_topk_url)
            .header(AUTHORIZATION, token)
            .json(&SubmitPayload { data: records })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(RequestFailure::BadStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl VerificationApi for VerifyClient {
    async fn fetch_token(&self) -> Result<String, ApiError> {
        self.get_token()
            .await
            .map_err(|detail| ApiError::TokenFetchFailure {
                endpoint: self.register_url.clone(),
                detail,
            })
    }

    async fn submit(&self, token: &str, records: &[ResultRecord]) -> Result<String, ApiError> {
        self.post_results(token, records)
            .await
            .map_err(|detail| ApiError::SubmissionFailure {
                endpoint: self.check_topk_url.clone(),
                detail,
            })
    }
}

/// 从 `/register` 响应体中提取令牌，空字符串视为缺失
fn extract_token(body: &str) -> Result<String, RequestFailure> {
    let parsed: RegisterResponse =
        serde_json::from_str(body).map_err(|e| RequestFailure::BadBody(e.to_string()))?;

    parsed
        .data
        .and_then(|d| d.authorization_token)
        .filter(|t| !t.is_empty())
        .ok_or(RequestFailure::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::JoinHandle;

    /// 本地 HTTP 服务：按顺序返回预设响应，并记录收到的原始请求
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/prod", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                requests.push(read_request(&mut stream));
                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
            requests
        });

        (base_url, handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client_for(base_url: String) -> VerifyClient {
        // 不走环境变量里的代理，直连本地服务
        let client = Client::builder().no_proxy().build().unwrap();
        VerifyClient::with_client(
            client,
            &Config {
                api_base_url: base_url,
                ..Config::default()
            },
        )
    }

    fn sample_records() -> Vec<ResultRecord> {
        vec![ResultRecord {
            id: Number::from(1),
            restaurant_name: "A".to_string(),
            rating: Number::from(4),
            distance_from_me: Number::from(2),
            score: 40.69,
        }]
    }

    #[test]
    fn test_extract_token() {
        let body = r#"{"data": {"authorizationToken": "abc123", "expires": 60}}"#;
        assert_eq!(extract_token(body).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_token_missing() {
        for body in [
            r#"{}"#,
            r#"{"data": null}"#,
            r#"{"data": {}}"#,
            r#"{"data": {"authorizationToken": ""}}"#,
            r#"{"data": {"authorizationToken": null}}"#,
        ] {
            assert!(
                matches!(extract_token(body), Err(RequestFailure::MissingToken)),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_extract_token_bad_body() {
        assert!(matches!(
            extract_token("<html>gateway error</html>"),
            Err(RequestFailure::BadBody(_))
        ));
        assert!(matches!(
            extract_token(r#"{"data": {"authorizationToken": 42}}"#),
            Err(RequestFailure::BadBody(_))
        ));
    }

    #[test]
    fn test_submit_payload_shape() {
        let records = vec![ResultRecord {
            id: Number::from(1),
            restaurant_name: "A".to_string(),
            rating: Number::from(4),
            distance_from_me: Number::from(2),
            score: 40.69,
        }];

        let body = serde_json::to_value(SubmitPayload { data: &records }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": [{
                    "id": 1,
                    "restaurant_name": "A",
                    "rating": 4,
                    "distance_from_me": 2,
                    "score": 40.69
                }]
            })
        );
    }

    #[test]
    fn test_urls_from_config() {
        let config = Config {
            api_base_url: "http://localhost:8080/prod/".to_string(),
            ..Config::default()
        };
        let client = VerifyClient::new(&config);
        assert_eq!(client.register_url, "http://localhost:8080/prod/register");
        assert_eq!(
            client.check_topk_url,
            "http://localhost:8080/prod/test/check-topk-sort"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_token_failure() {
        // 端口 1 上没有服务，连接会被拒绝
        let config = Config {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let client = VerifyClient::new(&config);

        let err = client.fetch_token().await.unwrap_err();
        assert!(err.is_token_failure());
    }

    #[tokio::test]
    async fn test_token_and_submit_requests() {
        let (base_url, server) = serve(vec![
            (200, r#"{"data": {"authorizationToken": "tok-123"}}"#),
            (200, r#"{"message": "correct"}"#),
        ]);
        let client = client_for(base_url);

        let token = client.fetch_token().await.unwrap();
        assert_eq!(token, "tok-123");

        let body = client.submit(&token, &sample_records()).await.unwrap();
        assert_eq!(body, r#"{"message": "correct"}"#);

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /prod/register HTTP/1.1\r\n"));

        let post = &requests[1];
        assert!(post.starts_with("POST /prod/test/check-topk-sort HTTP/1.1\r\n"));
        let lower = post.to_lowercase();
        assert!(lower.contains("\r\nauthorization: tok-123\r\n"));
        assert!(lower.contains("\r\ncontent-type: application/json\r\n"));
        assert!(post.ends_with(
            r#"{"data":[{"id":1,"restaurant_name":"A","rating":4,"distance_from_me":2,"score":40.69}]}"#
        ));
    }

    #[tokio::test]
    async fn test_non_2xx_is_bad_status() {
        let (base_url, server) = serve(vec![
            (500, "boom"),
            (400, r#"{"message": "wrong order"}"#),
        ]);
        let client = client_for(base_url);

        let err = client.fetch_token().await.unwrap_err();
        assert!(err.is_token_failure());
        assert_eq!(err.status(), Some(500));
        match err {
            ApiError::TokenFetchFailure {
                detail: RequestFailure::BadStatus { body, .. },
                ..
            } => assert_eq!(body, "boom"),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = client.submit("t", &sample_records()).await.unwrap_err();
        assert!(!err.is_token_failure());
        assert_eq!(err.status(), Some(400));
        match err {
            ApiError::SubmissionFailure {
                detail: RequestFailure::BadStatus { body, .. },
                ..
            } => assert_eq!(body, r#"{"message": "wrong order"}"#),
            other => panic!("unexpected error: {:?}", other),
        }

        server.join().unwrap();
    }
}
