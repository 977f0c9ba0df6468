mod app;
mod args;
mod entry;
mod error;
mod logger;
mod probe;
mod shutdown;
mod ui;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
