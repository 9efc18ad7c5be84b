use clap::{Args, Parser, Subcommand};
use replay_core::ReplayFlags;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "replay",
    version,
    about = "Replay captured HTTP requests with command-line overrides"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a captured request once, applying overrides
    Send(SendArgs),
    /// Write a standalone replay program for a captured request
    Generate(GenerateArgs),
    /// Print a captured request in raw HTTP form without sending it
    Show(ShowArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Captured request (.json, .yaml/.yml, or raw HTTP text)
    #[arg(long, short = 'c')]
    pub capture: PathBuf,

    #[command(flatten)]
    pub flags: ReplayFlags,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Captured request (.json, .yaml/.yml, or raw HTTP text)
    #[arg(long, short = 'c')]
    pub capture: PathBuf,

    /// Output directory (default: ./<name>)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Package and binary name of the generated program
    #[arg(long, default_value = "make_request")]
    pub name: String,

    /// Depend on a local replay-core checkout. Without it the program
    /// depends on the crates.io release matching this version, which must
    /// be published for the program to build.
    #[arg(long)]
    pub core_path: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Print main.rs to stdout instead of writing a project
    #[arg(long, conflicts_with_all = ["out", "force"])]
    pub stdout: bool,
}

impl GenerateArgs {
    pub fn out_dir(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.name))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Captured request (.json, .yaml/.yml, or raw HTTP text)
    #[arg(long, short = 'c')]
    pub capture: PathBuf,
}
