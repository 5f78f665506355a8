pub mod ingest;
pub mod lending;
