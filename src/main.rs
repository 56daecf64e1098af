use std::env;

use freedomcalc::api::{ApiError, run_cli_report, run_http_server};

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => match run_cli_report(raw_args.iter().skip(1)) {
            Ok(report) => print!("{report}"),
            Err(ApiError::Usage(e)) => e.exit(),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: freedomcalc serve [port]");
            eprintln!("       freedomcalc project [--current-age N] [--retire-age N] ...");
            std::process::exit(1);
        }
    }
}
