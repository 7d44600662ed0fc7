use clap::{Args, Parser, Subcommand};
use isbndb_client::configs;
use isbndb_client::{Client, ClientError, Collection, HttpTransport};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "isbndb", about = "ISBNdb 컬렉션 조회")]
struct Cli {
    /// API 인증 키. 지정하지 않으면 ISBNDB_KEY 설정을 사용한다.
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Books(Lookup),
    Subjects(Lookup),
    Categories(Lookup),
    Authors(Lookup),
    Publishers(Lookup),
}

impl Command {
    fn into_parts(self) -> (Collection, Lookup) {
        match self {
            Command::Books(l) => (Collection::Books, l),
            Command::Subjects(l) => (Collection::Subjects, l),
            Command::Categories(l) => (Collection::Categories, l),
            Command::Authors(l) => (Collection::Authors, l),
            Command::Publishers(l) => (Collection::Publishers, l),
        }
    }
}

#[derive(Args)]
struct Lookup {
    /// index1 필드 (예: isbn, title, name)
    index: String,

    /// value1 값
    value: String,

    /// 추가로 포함할 results 토큰
    #[arg(long)]
    results: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    page: Option<i32>,
}

fn main() -> ExitCode {
    configs::load_dotenv();
    let _guard = match configs::set_global_logging_config() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse();
    match run(cli) {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let config = configs::load_client_config()?;
    let key = cli.key
        .or_else(|| config.key().map(str::to_owned))
        .unwrap_or_default();

    let transport = HttpTransport::with_timeout(config.timeout()).map_err(ClientError::from)?;
    let client = Client::with_transport(key, transport)?
        .base_url(config.base_url());

    let (collection, lookup) = cli.command.into_parts();
    info!("{} 조회 (index1: {}, value1: {})", collection, lookup.index, lookup.value);

    let body = client.lookup(
        collection,
        &lookup.index,
        &lookup.value,
        lookup.results.as_deref(),
        lookup.page,
    )?;

    Ok(body)
}
