//! Reads HTML from stdin and prints the extraction result as JSON.
//!
//! Usage: `extract_stdin [BASE_URL] [--debug] < page.html`
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, Read};

use rs_article_heuristics::{extract_bytes, Options};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        if arg == "--debug" {
            options.debug = true;
        } else {
            options.base_url = Some(arg);
        }
    }

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let result = extract_bytes(&html, &options);
    match result.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize result: {err}");
            std::process::exit(1);
        }
    }
}
