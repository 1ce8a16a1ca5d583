use clap::{Parser, Subcommand};

mod db;
mod goods;

#[derive(Debug, Parser)]
#[command(name = "umkm-app", about = "UMKM shop administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Goods(goods::GoodsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Goods(command) => goods::run(command).await,
        }
    }
}
