pub mod catalog;
pub mod core;
pub mod search;
