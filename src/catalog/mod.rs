//! Static sample data and code listings shown alongside the ingestion run.
//!
//! Nothing here is parsed or executed; the records stand in for what the
//! three source systems would hold and the listings are display text.

pub mod listings;
pub mod records;

pub use listings::*;
pub use records::*;
