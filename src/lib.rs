// Library root: re-exports all modules so integration tests and the report
// binary can access the crate's public API.

pub mod age;
pub mod config;
pub mod contract;
pub mod draft;
pub mod feed;
pub mod roster;
