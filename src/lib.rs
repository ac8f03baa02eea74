pub mod fetcher;
pub mod sink;
pub mod source;
