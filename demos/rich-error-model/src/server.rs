//! Rich error model demo server.
//!
//! ```sh
//! cargo run -p rama-grpc-rich-error-demos --bin rich-error-server
//! ```

use std::time::Duration;

use clap::Parser;
use rama::{
    error::{BoxError, ErrorContext as _},
    rt::Executor,
    tcp::server::TcpListener,
};
use rama_grpc_rich_error_demos::{DEFAULT_ADDRESS, server::RichErrorModelDemoService, trace};
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "rich-error-server", about = "serve the rich error model demo")]
struct Cli {
    /// address to listen on
    #[arg(long, short = 'a', default_value = DEFAULT_ADDRESS)]
    address: String,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    trace::init_tracing(LevelFilter::INFO)?;

    let cli = Cli::parse();
    let graceful = rama::graceful::Shutdown::default();
    let exec = Executor::graceful(graceful.guard());

    let listener = TcpListener::bind(cli.address, exec.clone())
        .await
        .context("bind demo server")?;

    graceful.spawn_task_fn(async move |_| {
        if let Err(err) = RichErrorModelDemoService::new().serve(listener, exec).await {
            tracing::error!("demo server stopped: {err}");
        }
    });

    graceful
        .shutdown_with_limit(Duration::from_secs(30))
        .await?;

    Ok(())
}
