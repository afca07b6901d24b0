use std::process::ExitCode;

use kalman_grapher::app;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    match app::run(&args, std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(app::exit_status(&err))
        }
    }
}
