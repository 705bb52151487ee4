mod cli;
mod infra;
mod report;

use drugshield::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
