use clap::{Parser, Subcommand};

use crate::prelude::Result;

mod watch;

#[derive(Parser)]
#[command(about = "watches a job board and emails a digest of new postings")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Run one fetch/reconcile/notify cycle
    Watch,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        // deployed crontabs invoke the binary bare, same cycle either way
        Some(SubCommandType::Watch) | None => watch::run().await,
    }
}
