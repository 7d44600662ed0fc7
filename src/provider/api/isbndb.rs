use crate::provider::api::{Collection, Credential, Request};
use crate::provider::error::ClientError;
use crate::provider::transport::{HttpTransport, Transport};
use tracing::{debug, error};

/// ISBNdb API 기본 URL
pub const BASE_URL: &str = "http://isbndb.com/api/";

/// ISBNdb API 클라이언트
///
/// 인증 키는 생성 시점에 한 번만 설정 되며 요청 사이에 공유 되는 가변 상태는 없다.
/// 따라서 전송 계층이 `Sync` 라면 하나의 클라이언트로 여러 스레드에서 동시에 요청할 수 있다.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    credential: Credential,
    base_url: String,
    transport: T,
}

impl Client<HttpTransport> {
    pub fn new<S: Into<String>>(key: S) -> Result<Self, ClientError> {
        let credential = Credential::new(key)?;
        let transport = HttpTransport::new()?;

        Ok(Self { credential, base_url: BASE_URL.to_owned(), transport })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport<S: Into<String>>(key: S, transport: T) -> Result<Self, ClientError> {
        let credential = Credential::new(key)?;

        Ok(Self { credential, base_url: BASE_URL.to_owned(), transport })
    }

    /// 기본 URL 을 변경한다. 컬렉션 엔드포인트 경로가 뒤에 붙으므로 `/` 로 끝나지 않으면 덧붙인다.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// 요청을 보낼 전체 URL
    pub fn url(&self, request: &Request) -> String {
        format!(
            "{}{}?{}",
            self.base_url,
            request.collection().grammar().endpoint(),
            request.encoded_query_string(&self.credential)
        )
    }

    /// 검증된 요청을 전송하고 줄바꿈 문자(`\n`)를 제거한 응답 본문을 반환한다.
    pub fn request(&self, request: &Request) -> Result<String, ClientError> {
        debug!(
            collection = %request.collection(),
            index1 = request.index(),
            results = request.results(),
            page_number = request.page(),
            "isbndb request"
        );

        let text = self.transport.fetch(&self.url(request))
            .map_err(|err| {
                error!("isbndb {} request failed => {}", request.collection(), err);
                ClientError::Transport(err)
            })?;

        Ok(text.replace('\n', ""))
    }

    pub fn request_books(&self, index: &str, value: &str, results: Option<&str>, page: Option<i32>) -> Result<String, ClientError> {
        self.lookup(Collection::Books, index, value, results, page)
    }

    pub fn request_subjects(&self, index: &str, value: &str, results: Option<&str>, page: Option<i32>) -> Result<String, ClientError> {
        self.lookup(Collection::Subjects, index, value, results, page)
    }

    pub fn request_categories(&self, index: &str, value: &str, results: Option<&str>, page: Option<i32>) -> Result<String, ClientError> {
        self.lookup(Collection::Categories, index, value, results, page)
    }

    pub fn request_authors(&self, index: &str, value: &str, results: Option<&str>, page: Option<i32>) -> Result<String, ClientError> {
        self.lookup(Collection::Authors, index, value, results, page)
    }

    pub fn request_publishers(&self, index: &str, value: &str, results: Option<&str>, page: Option<i32>) -> Result<String, ClientError> {
        self.lookup(Collection::Publishers, index, value, results, page)
    }

    pub fn lookup(
        &self,
        collection: Collection,
        index: &str,
        value: &str,
        results: Option<&str>,
        page: Option<i32>,
    ) -> Result<String, ClientError> {
        let mut builder = Request::builder(collection)
            .index(index)
            .value(value);
        if let Some(results) = results {
            builder = builder.results(results);
        }
        if let Some(page) = page {
            builder = builder.page(page);
        }

        self.request(&builder.build()?)
    }
}
