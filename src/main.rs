use std::process::ExitCode;

use heic_to_png::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(outcome) => {
            log::info!("程式執行完成：{}", outcome.message());
            println!("{}", outcome.message());
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            log::error!("執行失敗：{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
