use crate::cli::args::SendArgs;
use crate::exit_codes::SUCCESS;
use replay_core::{load_baseline, script};
use std::io;

pub async fn run(args: SendArgs) -> anyhow::Result<i32> {
    let baseline = load_baseline(&args.capture)?;
    tracing::debug!(capture = %args.capture.display(), url = %baseline.url(), "loaded capture");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    script::run(&baseline, &args.flags, &mut out).await?;

    Ok(SUCCESS)
}
