use crate::provider::error::TransportError;
use reqwest::{blocking, Url};
use std::time::Duration;

/// API 요청의 기본 타임아웃 시간(초)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 완성된 URL 로 요청을 보내고 응답 본문을 그대로 반환하는 전송 계층
///
/// 타임아웃과 취소 정책은 구현체가 결정한다.
pub trait Transport {
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}

/// reqwest blocking 클라이언트를 이용한 HTTP 전송 계층
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("cannot build http client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let url = Url::parse(url)
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

        let response = self.client.get(url)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    TransportError::Timeout(err.to_string())
                } else {
                    TransportError::RequestFailed(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        response.text()
            .map_err(|err| TransportError::ResponseTextExtractionFailed(err.to_string()))
    }
}
