pub mod cli;
pub mod host;
pub mod repl;
