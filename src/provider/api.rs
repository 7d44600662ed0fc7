use crate::provider::error::RequestError;
use std::borrow::Cow;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod isbndb;

/// 모든 컬렉션에서 공통으로 허용 되는 results 토큰
pub const COMMON_RESULT_TOKENS: [&str; 2] = ["keystats", "args"];

/// 컬렉션 별 검색 문법
///
/// index1 으로 사용할 수 있는 필드와 컬렉션 전용 results 토큰 목록, 그리고 엔드포인트 경로를 가진다.
/// [`COMMON_RESULT_TOKENS`]는 모든 컬렉션에서 허용 되므로 따로 적지 않는다.
/// 프로그램 시작 시점에 정적으로 정의 되며 변경 되지 않는다.
#[derive(Debug, PartialEq, Eq)]
pub struct Grammar {
    endpoint: &'static str,
    index_fields: &'static [&'static str],
    result_tokens: &'static [&'static str],
}

impl Grammar {
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn index_fields(&self) -> &'static [&'static str] {
        self.index_fields
    }

    /// 공통 토큰을 포함한 허용 results 토큰 전체
    pub fn result_tokens(&self) -> Vec<&'static str> {
        COMMON_RESULT_TOKENS.iter()
            .chain(self.result_tokens)
            .copied()
            .collect()
    }

    pub fn allows_index(&self, field: &str) -> bool {
        self.index_fields.contains(&field)
    }

    pub fn allows_result(&self, token: &str) -> bool {
        COMMON_RESULT_TOKENS.contains(&token) || self.result_tokens.contains(&token)
    }
}

static BOOKS: Grammar = Grammar {
    endpoint: "books.xml",
    index_fields: &[
        "isbn", "title", "combined", "full", "book_id", "person_id",
        "publisher_id", "subject_id", "dewey_decimal", "lcc_number",
    ],
    result_tokens: &[
        "details", "texts", "prices", "pricehistory", "subjects", "marc", "authors",
    ],
};

static SUBJECTS: Grammar = Grammar {
    endpoint: "subjects.xml",
    index_fields: &["name", "category_id", "subject_id"],
    result_tokens: &["categories", "structure"],
};

static CATEGORIES: Grammar = Grammar {
    endpoint: "categories.xml",
    index_fields: &["name", "category_id", "parent_id"],
    result_tokens: &["details", "subcategories"],
};

static AUTHORS: Grammar = Grammar {
    endpoint: "authors.xml",
    index_fields: &["name", "person_id"],
    result_tokens: &["details", "categories", "subjects"],
};

static PUBLISHERS: Grammar = Grammar {
    endpoint: "publishers.xml",
    index_fields: &["name", "publisher_id"],
    result_tokens: &["details", "categories"],
};

/// ISBNdb 에서 조회 가능한 컬렉션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Subjects,
    Categories,
    Authors,
    Publishers,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Books,
        Collection::Subjects,
        Collection::Categories,
        Collection::Authors,
        Collection::Publishers,
    ];

    pub fn grammar(&self) -> &'static Grammar {
        match self {
            Collection::Books => &BOOKS,
            Collection::Subjects => &SUBJECTS,
            Collection::Categories => &CATEGORIES,
            Collection::Authors => &AUTHORS,
            Collection::Publishers => &PUBLISHERS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Subjects => "subjects",
            Collection::Categories => "categories",
            Collection::Authors => "authors",
            Collection::Publishers => "publishers",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for Collection {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let name = value.to_lowercase();
        Collection::ALL.into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| format!("Unknown collection: {}", value))
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::try_from(s)
    }
}

/// API 인증 키
///
/// 클라이언트 생성 시점에 한 번 설정 되며 `access_key=<key>` 쿼리 조각을 미리 만들어 둔다.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    fragment: String,
}

impl Credential {
    pub fn new<S: Into<String>>(key: S) -> Result<Self, RequestError> {
        let key = key.into();
        if key.is_empty() {
            return Err(RequestError::InvalidCredential);
        }
        let fragment = format!("access_key={}", key);
        Ok(Self { key, fragment })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 인코딩 하지 않은 `access_key=<key>` 쿼리 조각

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

// 키가 로그에 남지 않도록 직접 구현
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").finish_non_exhaustive()
    }
}

/// 검증이 완료된 단일 조회 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    collection: Collection,
    index: String,
    value: String,
    results: Option<String>,
    page: Option<i32>,
}

impl Request {
    pub fn builder(collection: Collection) -> RequestBuilder {
        RequestBuilder::new(collection)
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn results(&self) -> Option<&str> {
        self.results.as_deref()
    }

    pub fn page(&self) -> Option<i32> {
        self.page
    }

    /// 인코딩 하지 않은 쿼리 문자열
    ///
    /// `access_key=<key>[&results=<token>]&index1=<field>&value1=<value>[&page_number=<n>]`
    pub fn query_string(&self, credential: &Credential) -> String {
        self.assemble(credential.fragment(), verbatim)
    }

    /// access_key, value1, results 를 form-urlencoding 한 쿼리 문자열로 필드 순서는 [`Request::query_string`]과 같다.
    pub fn encoded_query_string(&self, credential: &Credential) -> String {
        let key = form_encode(credential.key());
        self.assemble(&format!("access_key={}", key), form_encode)
    }

    fn assemble(&self, access: &str, encode: fn(&str) -> Cow<'_, str>) -> String {
        let mut variables = vec![access.to_owned()];
        if let Some(results) = &self.results {
            variables.push(format!("results={}", encode(results.as_str())));
        }
        variables.push(format!("index1={}", self.index));
        variables.push(format!("value1={}", encode(self.value.as_str())));
        if let Some(page) = self.page {
            variables.push(format!("page_number={}", page));
        }
        variables.join("&")
    }
}

fn verbatim(s: &str) -> Cow<'_, str> {
    Cow::Borrowed(s)
}

fn form_encode(s: &str) -> Cow<'_, str> {
    Cow::Owned(url::form_urlencoded::byte_serialize(s.as_bytes()).collect())
}

pub struct RequestBuilder {
    collection: Collection,
    index: Option<String>,
    value: Option<String>,
    results: Option<String>,
    page: Option<i32>,
}

impl RequestBuilder {
    pub fn new(collection: Collection) -> Self {
        RequestBuilder {
            collection,
            index: None,
            value: None,
            results: None,
            page: None,
        }
    }

    pub fn index<S: Into<String>>(mut self, index: S) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn results<S: Into<String>>(mut self, results: S) -> Self {
        self.results = Some(results.into());
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn build(self) -> Result<Request, RequestError> {
        let collection = self.collection;
        let grammar = collection.grammar();

        let index = self.index.unwrap_or_default();
        if !grammar.allows_index(&index) {
            return Err(RequestError::InvalidIndexField {
                collection,
                value: index,
                allowed: grammar.index_fields(),
            });
        }

        let value = match self.value {
            Some(value) if !value.is_empty() => value,
            _ => return Err(RequestError::InvalidIndexValue { collection }),
        };

        if let Some(results) = &self.results {
            if !grammar.allows_result(results) {
                return Err(RequestError::InvalidResultToken {
                    collection,
                    value: results.clone(),
                    allowed: grammar.result_tokens(),
                });
            }
        }

        if let Some(page) = self.page {
            if page < 0 {
                return Err(RequestError::InvalidPageNumber(page));
            }
        }

        Ok(Request {
            collection,
            index,
            value,
            results: self.results,
            page: self.page,
        })
    }
}
