use certmgr::cli::{handle_command, Cli};

fn main() {
    use clap::Parser;
    let cli = Cli::parse();

    if let Err(e) = handle_command(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
