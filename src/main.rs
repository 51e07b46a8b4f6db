use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match ehr_cds_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ehr-cds: {e}");
            ExitCode::FAILURE
        }
    }
}
