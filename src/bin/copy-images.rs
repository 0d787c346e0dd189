use clap::Parser;
use memebuild::{copy_images, init_tracing, Args};

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = args.layout().and_then(|layout| copy_images(&layout)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
