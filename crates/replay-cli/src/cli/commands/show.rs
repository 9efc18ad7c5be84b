use crate::cli::args::ShowArgs;
use crate::exit_codes::SUCCESS;
use replay_core::{load_baseline, render, EffectiveRequest, Overrides};
use std::io::{self, Write};

/// Print the baseline exactly as `send -q` would, without any overrides.
pub fn cmd_show(args: ShowArgs) -> anyhow::Result<i32> {
    let baseline = load_baseline(&args.capture)?;
    let request = EffectiveRequest::build(&baseline, &Overrides::default());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_request(&mut out, &request)?;
    out.flush()?;

    Ok(SUCCESS)
}
