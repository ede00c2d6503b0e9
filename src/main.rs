mod app;
mod cli;

use std::process;

fn main() {
    let cli = cli::parse();
    ffbatch::engine::init_logging(cli.verbose);

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
