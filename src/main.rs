use clap::Parser;
use termin::cli::Cli;

#[tokio::main]
async fn main() {
    termin::init_logger();

    let cli = Cli::parse();
    if let Err(err) = termin::run(cli.command, cli.config).await {
        log::debug!("Command failed: {:?}", err);
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
