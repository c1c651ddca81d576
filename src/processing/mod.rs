pub mod csv_writer;
pub mod filter;
pub mod summary;
