pub mod app;
pub mod cli;
pub mod ledger;
pub mod store;
pub mod term;
pub mod types;
pub mod utils;
