use clap::Parser;
use memebuild::{generate_meme_list, init_tracing, Args};

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = args.layout().and_then(|layout| generate_meme_list(&layout)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
