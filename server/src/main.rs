use clap::Parser;
use cli::{Cli, Command};

mod cli;
mod compass;
mod config;
mod db;
mod forecast;
mod models;
mod repos;
mod server;
mod sky;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    match args.cmd {
        Command::Http { address } => server::run(address, &args.database_url).await,
        Command::Db(db_cmd) => match db_cmd.cmd {
            cli::DbSubCommand::Migrate => {
                db::migrate(&args.database_url).await.unwrap();
            }
            cli::DbSubCommand::Reset => {
                db::reset(&args.database_url).await.unwrap();
            }
        },
    }
}
