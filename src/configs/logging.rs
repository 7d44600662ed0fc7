use thiserror::Error;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log level must be one of TRACE, DEBUG, INFO, WARN, ERROR (got `{0}`)")]
    InvalidLevel(String),

    #[error("log rotation must be one of DAILY, HOURLY, MINUTELY, NEVER (got `{0}`)")]
    InvalidRotation(String),

    #[error("max log files must be a non-negative integer (got `{0}`)")]
    InvalidKeep(String),

    #[error("cannot create log file appender: {0}")]
    Appender(String),

    #[error("cannot install global subscriber: {0}")]
    Init(String),
}

#[derive(Debug)]
pub struct Config {
    /// 로그 파일을 남길 디렉토리와 파일 이름. 설정 되지 않을시 stdout 에만 출력 된다.
    pub file: Option<(String, String)>,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    pub keep: Option<usize>,

    /// 파일과 stdout에 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 DEBUG로 설정 된다.
    ///
    /// 이 값은 [`tracing::Level`]로 변환 됨으로 자세한 사항은 해당 파일을 확인
    pub level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    ///
    /// 이 값은 [`rolling::Rotation`]으로 변환 됨으로 자세한 사항은 해당 파일을 확인
    pub rotation: Option<String>,
}

pub fn set_global_logging_config(c: &Config) -> Result<Option<WorkerGuard>, LoggingError> {
    let level = match &c.level {
        Some(level) => parse_level(level)?,
        None => tracing::Level::DEBUG,
    };

    let (writer, guard) = if let Some((dir, name)) = &c.file {
        let mut file_appender = rolling::RollingFileAppender::builder()
            .filename_prefix(name.clone())
            .filename_suffix("log");

        if let Some(rotation) = &c.rotation {
            file_appender = file_appender.rotation(parse_rotation(rotation)?);
        } else {
            file_appender = file_appender.rotation(rolling::Rotation::DAILY);
        }

        if let Some(keep) = c.keep {
            file_appender = file_appender.max_log_files(keep);
        }

        let file_appender = file_appender.build(dir.clone())
            .map_err(|e| LoggingError::Appender(e.to_string()))?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (BoxMakeWriter::new(std::io::stdout.and(non_blocking)), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stdout), None)
    };

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")))
        .with_writer(writer)
        .with_max_level(level)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, LoggingError> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(LoggingError::InvalidRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, LoggingError> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(LoggingError::InvalidLevel(l.to_owned())),
    }
}
