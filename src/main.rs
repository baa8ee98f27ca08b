mod app;
mod args;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;
mod report;
mod shutdown;
mod shutdown_handlers;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
