use log::error;
use quizbox::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match Config::from_env().and_then(quizbox::app::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
