//! Export functionality for scraped flight records.

mod csv;

pub use self::csv::{output_path, write_records_csv};
