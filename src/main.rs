use std::process::ExitCode;

fn main() -> ExitCode {
  match trainer_report_lib::run() {
    Ok(_) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("Report failed: {}", e);
      ExitCode::FAILURE
    }
  }
}
