pub mod config;
pub mod inspect;
pub mod output;
pub mod resolve;
