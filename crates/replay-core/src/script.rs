//! Runtime of a generated replay program: flag parsing and the
//! build → print → dispatch → print sequence.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Command, FromArgMatches};

use crate::baseline::RequestBaseline;
use crate::dispatch::Dispatcher;
use crate::effective::{EffectiveRequest, Overrides};
use crate::error::{ReplayError, ReplayResult};
use crate::render;

/// Flags accepted by every replay program (and by `replay send`).
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayFlags {
    /// change the method of the request
    #[arg(short, long)]
    pub method: Option<String>,

    /// change the url of the request
    #[arg(short, long)]
    pub url: Option<String>,

    /// add a header to the request. Format: "name: value"
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// remove the specified header
    #[arg(short = 'r', long = "remove-header", value_name = "NAME")]
    pub remove_headers: Vec<String>,

    /// replace body
    #[arg(short, long)]
    pub body: Option<String>,

    /// print raw request
    #[arg(short = 'q', long)]
    pub print_request: bool,

    /// print raw response
    #[arg(short = 'p', long)]
    pub print_response: bool,
}

impl ReplayFlags {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            remove_headers: self.remove_headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// Parse replay flags, describing the baseline in `--help`.
pub fn parse_flags<I, T>(baseline: &RequestBaseline, args: I) -> Result<ReplayFlags, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = ReplayFlags::augment_args(Command::new("make_request"))
        .about(format!(
            "Make a {} request to {}",
            baseline.method,
            baseline.url()
        ))
        .after_help("Script generated with efin-replay");
    let matches = command.try_get_matches_from(args)?;
    ReplayFlags::from_arg_matches(&matches)
}

/// Replay `baseline` with `flags`, writing renderings to `out`.
///
/// The request is printed before dispatch, so it shows up even when the
/// exchange then fails. The raw response replaces the summary line.
pub async fn run<W: Write>(
    baseline: &RequestBaseline,
    flags: &ReplayFlags,
    out: &mut W,
) -> ReplayResult<()> {
    let request = EffectiveRequest::build(baseline, &flags.overrides());

    if flags.print_request {
        render::write_request(out, &request)?;
        out.flush()?;
    }

    let response = Dispatcher::new()?.send(request).await?;

    if flags.print_response {
        render::write_response(out, &response)?;
    } else {
        render::write_summary(out, &response)?;
    }
    out.flush()?;
    Ok(())
}

/// Entry point of generated programs: replay with the process arguments and
/// turn the outcome into the process exit status.
pub fn main_with_baseline(baseline: RequestBaseline) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = run_main(&baseline, std::env::args_os(), &mut out);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Parse `args`, replay on a current-thread runtime, and return the exit
/// code. Help and version text go to `out`; usage errors and failures are
/// reported on stderr.
pub fn run_main<I, T, W>(baseline: &RequestBaseline, args: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let flags = match parse_flags(baseline, args) {
        Ok(flags) => flags,
        Err(e) if e.use_stderr() => {
            eprint!("{}", e.render());
            return e.exit_code();
        }
        Err(e) => {
            if let Err(io_err) = write!(out, "{}", e.render()).and_then(|()| out.flush()) {
                eprintln!("fatal: {io_err:?}");
                return ReplayError::from(io_err).exit_code();
            }
            return e.exit_code();
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("fatal: failed to start runtime: {e:?}");
            return 1;
        }
    };

    match runtime.block_on(run(baseline, &flags, out)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> RequestBaseline {
        RequestBaseline::new("example.com", "/api", "GET").with_header("Host", "example.com")
    }

    #[test]
    fn test_parse_all_flags() {
        let flags = parse_flags(
            &baseline(),
            [
                "make_request",
                "-m",
                "post",
                "-u",
                "http://localhost/x",
                "-H",
                "X-A: 1",
                "--header",
                "X-B: 2",
                "-r",
                "cookie",
                "--remove-header",
                "Accept",
                "-b",
                "hello",
                "-q",
                "-p",
            ],
        )
        .unwrap();

        assert_eq!(flags.method.as_deref(), Some("post"));
        assert_eq!(flags.url.as_deref(), Some("http://localhost/x"));
        assert_eq!(flags.headers, ["X-A: 1", "X-B: 2"]);
        assert_eq!(flags.remove_headers, ["cookie", "Accept"]);
        assert_eq!(flags.body.as_deref(), Some("hello"));
        assert!(flags.print_request);
        assert!(flags.print_response);
    }

    #[test]
    fn test_parse_no_flags_is_default() {
        let flags = parse_flags(&baseline(), ["make_request"]).unwrap();
        assert_eq!(flags, ReplayFlags::default());
        assert_eq!(flags.overrides(), Overrides::default());
    }

    #[test]
    fn test_help_describes_baseline() {
        let err = parse_flags(&baseline(), ["make_request", "--help"]).unwrap_err();
        let help = err.to_string();

        assert!(help.contains("Make a GET request to https://example.com/api"));
        assert!(help.contains("--remove-header"));
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = parse_flags(&baseline(), ["make_request", "--retry"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_run_main_usage_error_exits_2() {
        let mut out = Vec::new();
        let code = run_main(&baseline(), ["make_request", "--retry"], &mut out);

        assert_eq!(code, 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_main_help_goes_to_out() {
        let mut out = Vec::new();
        let code = run_main(&baseline(), ["make_request", "--help"], &mut out);

        assert_eq!(code, 0);
        let help = String::from_utf8(out).unwrap();
        assert!(help.contains("Make a GET request to https://example.com/api"));
        assert!(help.contains("Script generated with efin-replay"));
    }

    #[test]
    fn test_run_main_transport_failure_exits_1() {
        let mut out = Vec::new();
        let code = run_main(
            &baseline(),
            ["make_request", "-u", "http://127.0.0.1:9/api", "-q"],
            &mut out,
        );

        assert_eq!(code, 1);
        // The request is printed before the exchange fails.
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("GET http://127.0.0.1:9/api HTTP/1.1\r\n"));
        assert!(!printed.contains("Status:"));
    }
}
