use crate::provider::api::isbndb::BASE_URL;
use crate::provider::transport::DEFAULT_TIMEOUT_SECONDS;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;

mod logging;

pub use logging::LoggingError;

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// ISBNdb 클라이언트 설정
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// API 인증 키로 명령행 인자로 전달 될 수도 있으므로 필수가 아니다.
    key: Option<String>,
    base_url: String,
    timeout_secs: u64,
}

impl ClientConfig {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `config/<RUN_MODE>.json` 파일과 `ISBNDB_` 로 시작하는 환경 변수에서 클라이언트 설정을 읽는다.
///
/// 파일이 없어도 에러가 아니며 같은 항목은 환경 변수가 우선한다.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let builder = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}.json", env)).required(false))
        .add_source(config::Environment::with_prefix("ISBNDB").try_parsing(true));

    client_config_from(builder)
}

fn client_config_from(builder: ConfigBuilder<DefaultState>) -> Result<ClientConfig, ConfigError> {
    builder
        .set_default("base_url", BASE_URL)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECONDS)?
        .build()?
        .try_deserialize()
}

/// 프로그램에서 사용할 로깅 옵션을 설정한다.
///
/// `LOGGER_DIR` 과 `LOGGER_FILE_NAME` 이 모두 설정 되어 있으면 파일에도 로그를 남기며
/// 이때 반환 되는 [`WorkerGuard`]는 프로그램이 끝날 때까지 유지 해야 한다.
pub fn set_global_logging_config() -> Result<Option<WorkerGuard>, LoggingError> {
    let file = match (env::var("LOGGER_DIR"), env::var("LOGGER_FILE_NAME")) {
        (Ok(dir), Ok(name)) => Some((dir, name)),
        _ => None,
    };

    let keep = env::var("LOGGER_KEEP").ok()
        .map(|v| v.parse::<usize>().map_err(|_| LoggingError::InvalidKeep(v)))
        .transpose()?;
    let level = env::var("LOGGER_LEVEL").ok();
    let rotation = env::var("LOGGER_ROTATION").ok();

    let options = logging::Config {
        file,
        keep,
        level,
        rotation,
    };

    logging::set_global_logging_config(&options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_applied() {
        let builder = config::Config::builder()
            .add_source(File::from_str(r#"{"key": "abc123"}"#, FileFormat::Json));

        let config = client_config_from(builder).unwrap();

        assert_eq!(config.key(), Some("abc123"));
        assert_eq!(config.base_url(), BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
    }

    #[test]
    fn file_values_override_defaults() {
        let json = r#"{"base_url": "http://localhost:8080/api/", "timeout_secs": 3}"#;
        let builder = config::Config::builder()
            .add_source(File::from_str(json, FileFormat::Json));

        let config = client_config_from(builder).unwrap();

        assert_eq!(config.key(), None);
        assert_eq!(config.base_url(), "http://localhost:8080/api/");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
