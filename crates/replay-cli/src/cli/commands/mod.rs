use super::args::*;

pub mod generate;
pub mod send;
pub mod show;

use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Send(args) => send::run(args).await,
        Command::Generate(args) => generate::cmd_generate(args),
        Command::Show(args) => show::cmd_show(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
