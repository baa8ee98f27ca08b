use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app;
use crate::args::AggregatorArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

/// Grace period for blocking readers (stdin) once the run has finished.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(250);

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(app::run(args));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
    result
}

fn parse_args() -> AppResult<(AggregatorArgs, ArgMatches)> {
    let matches = AggregatorArgs::command().get_matches();
    let args = AggregatorArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
