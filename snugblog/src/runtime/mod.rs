pub mod commands;
pub mod executor;
pub mod scripts;

pub use executor::run_script;
