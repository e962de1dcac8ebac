pub mod cli;
pub mod config;
pub mod filter;
pub mod github;
pub mod output;
pub mod report;
pub mod run;
