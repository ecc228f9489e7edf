mod bootstrap;
mod loop_runner;
mod panels;
mod plaza;

use std::process::ExitCode;

pub(crate) fn run() -> ExitCode {
    match bootstrap::build_app() {
        Some(app) => loop_runner::run(app),
        None => ExitCode::FAILURE,
    }
}
