use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "urlfetch")]
#[command(about = "Fetch a list of URLs with a bounded worker pool", long_about = None)]
pub struct Cli {
    /// File with URLs, one per line
    #[arg(long, default_value = "urls.txt")]
    pub file: PathBuf,

    /// Number of concurrent workers
    #[arg(long, default_value = "5")]
    pub workers: NonZeroUsize,
}
