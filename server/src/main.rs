use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Alaska bear CRUD service", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[arg(long, env = "ALASKA_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(short, long, env = "ALASKA_PORT", default_value_t = 8091)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    init_logging();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr).await?;
    alaska_server::run(listener).await
}

fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}
