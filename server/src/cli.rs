use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Maresia forecast service CLI.")]
pub struct Cli {
    #[arg(env = "MARESIA_DATABASE_URL", short, long)]
    pub database_url: String,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Http {
        #[arg(env = "MARESIA_SERVER_ADDRESS")]
        address: std::net::SocketAddr,
    },
    Db(DbCommand),
}

#[derive(Debug, Parser)]
pub struct DbCommand {
    #[command(subcommand)]
    pub cmd: DbSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbSubCommand {
    Reset,
    Migrate,
}
