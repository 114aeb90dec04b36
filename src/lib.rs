pub mod books;
pub mod catalog;
pub mod core;
pub mod enrichment;
pub mod gateway;
pub mod utils;
