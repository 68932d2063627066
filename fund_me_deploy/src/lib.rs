pub mod artifacts;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod error;
pub mod ledger;
pub mod verify;
