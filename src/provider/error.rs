use crate::provider::api::Collection;
use thiserror::Error;

/// 요청 값 검증 중 발생하는 에러
///
/// 모든 검증은 네트워크 요청 전에 수행 되므로 이 에러가 반환 되었다면 요청은 전송 되지 않은 상태이다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// 인증 키가 비어 있음
    #[error("access key must be a non-empty string")]
    InvalidCredential,

    /// 컬렉션에서 허용 하지 않는 index1 필드
    #[error("index1 `{value}` is not allowed for {collection}, expected one of {}", .allowed.join("|"))]
    InvalidIndexField {
        collection: Collection,
        value: String,
        allowed: &'static [&'static str],
    },

    /// value1 값이 비어 있음
    #[error("value1 must be a non-empty string ({collection})")]
    InvalidIndexValue { collection: Collection },

    /// 컬렉션에서 허용 하지 않는 results 토큰
    #[error("results `{value}` is not allowed for {collection}, expected one of {}", .allowed.join("|"))]
    InvalidResultToken {
        collection: Collection,
        value: String,
        allowed: Vec<&'static str>,
    },

    /// 음수 페이지 번호
    #[error("page_number `{0}` is invalid, expected an integer >= 0")]
    InvalidPageNumber(i32),
}

/// 전송 계층에서 발생하는 에러
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// 2xx 이외의 응답 코드
    #[error("unexpected http status: {0}")]
    Status(u16),

    #[error("cannot read response body: {0}")]
    ResponseTextExtractionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// 전송 계층의 에러를 그대로 전달한다.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
}
