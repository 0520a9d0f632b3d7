pub mod config;
pub mod idcard_processor;
pub mod models;
pub mod processing;
pub mod storage;
pub mod utils;

pub use idcard_processor::IdCardProcessor;
