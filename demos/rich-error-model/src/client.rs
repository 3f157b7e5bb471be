//! Rich error model demo client.
//!
//! Issues an echo call followed by a simple and a complex error call, and
//! logs what it finds in the trailers of each failure.
//!
//! ```sh
//! cargo run -p rama-grpc-rich-error-demos --bin rich-error-client
//! ```

use clap::Parser;
use rama::{
    error::{BoxError, ErrorContext as _},
    http::{Uri, client::EasyHttpWebClient},
};
use rama_grpc_rich_error_demos::{
    DEFAULT_ADDRESS,
    client::{RichErrorModelDemoClient, demo_request, into_reply},
    proto::Action,
    report::{describe_simple_error, describe_status_details},
    trace,
};
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "rich-error-client", about = "call the rich error model demo")]
struct Cli {
    /// address of the demo server
    #[arg(long, short = 'a', default_value = DEFAULT_ADDRESS)]
    address: String,

    /// prefix prepended to every message sent
    #[arg(long, short = 'm')]
    message: Option<String>,
}

impl Cli {
    fn message(&self, message: &str) -> String {
        match &self.message {
            Some(prefix) => format!("{prefix} {message}"),
            None => message.to_owned(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    trace::init_tracing(LevelFilter::INFO)?;

    let cli = Cli::parse();
    let origin: Uri = format!("http://{}", cli.address)
        .parse()
        .context("parse demo server address")?;
    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin);

    let response = into_reply(
        client
            .echo_request(demo_request(cli.message("first message"), Action::Echo))
            .await,
    )
    .context("echo call")?;
    tracing::info!("response: {}", response.echoed_message);

    for (message, action) in [
        ("second message", Action::SimpleError),
        ("third message", Action::ComplexError),
    ] {
        let result = client
            .echo_request(demo_request(cli.message(message), action))
            .await;
        let status = match into_reply(result) {
            Ok(response) => {
                tracing::warn!("expected an error, got: {}", response.echoed_message);
                continue;
            }
            Err(status) => status,
        };

        let lines = match action {
            Action::SimpleError => describe_simple_error(&status),
            Action::Echo | Action::ComplexError => describe_status_details(&status),
        };
        for line in lines {
            tracing::info!("{line}");
        }
    }

    Ok(())
}
