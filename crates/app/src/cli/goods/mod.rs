use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct GoodsCommand {
    #[command(subcommand)]
    command: GoodsSubcommand,
}

#[derive(Debug, Subcommand)]
enum GoodsSubcommand {
    /// Add goods to the catalog
    Create(create::CreateGoodsArgs),

    /// Print one page of the catalog
    List(list::ListGoodsArgs),
}

pub(crate) async fn run(command: GoodsCommand) -> Result<(), String> {
    match command.command {
        GoodsSubcommand::Create(args) => create::run(args).await,
        GoodsSubcommand::List(args) => list::run(args).await,
    }
}
