//! different utility modules used throughout the project
/// tiny module to save sampled expansions into file
pub mod logger;
/// terminal and file logging set up with simplelog
pub mod log_setup;
