use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;

use agentfetch::cli::{Cli, ImpersonateTarget};
use agentfetch::error::AppError;
use agentfetch::fetch::{self, BridgeRequest, BridgeResponse, Browser, FetchOptions};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            AppError::Usage.print_json_stdout();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli).await {
        e.print_json_stdout();
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let request =
        BridgeRequest::from_args(&cli.method, &cli.url, &cli.headers_json, cli.body.as_deref())?;
    let options = FetchOptions {
        timeout: Duration::from_millis(cli.timeout),
        browser: convert_target(cli.impersonate),
    };

    let response = fetch::execute(&request, &options).await?;
    print_response(&response, cli.pretty)
}

fn convert_target(target: ImpersonateTarget) -> Browser {
    match target {
        ImpersonateTarget::Chrome => Browser::Chrome,
        ImpersonateTarget::Firefox => Browser::Firefox,
        ImpersonateTarget::Safari => Browser::Safari,
        ImpersonateTarget::Edge => Browser::Edge,
    }
}

fn print_response(response: &BridgeResponse, pretty: bool) -> Result<(), AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    let json = json.map_err(|e| AppError::Internal(format!("serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}
