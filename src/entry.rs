use clap::Parser;

use crate::args::ProbeArgs;
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let args = ProbeArgs::parse();
    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args))
}

async fn run_async(args: &ProbeArgs) -> AppResult<()> {
    let config = crate::app::probe_config(args)?;
    if args.tui {
        crate::ui::run_dashboard(&config).await
    } else {
        crate::app::run(args, &config).await
    }
}
