use std::process::ExitCode;

use sequel::app::WorkloadApp;
use sequel::logging;
use sequel::types::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    let app = match WorkloadApp::from_env() {
        Ok(app) => app,
        Err(AppError::Cli(err)) => {
            // Covers --help and --version too, which exit with 0.
            let _ = err.print();
            return ExitCode::from(err.exit_code() as u8);
        }
        Err(err) => return ExitCode::from(logging::report_fatal(&err)),
    };

    match app.execute().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(logging::report_fatal(&err)),
    }
}
