use clap::Parser;
use multi_account::ui::cli;
use multi_account::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_logging(args.verbose);
    if let Err(e) = cli::run_cli(args).await {
        eprintln!("multi-account: {e}");
        std::process::exit(1);
    }
}
