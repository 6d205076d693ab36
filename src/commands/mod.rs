mod common;
mod init;
mod run;
mod score;

pub use init::{InitArgs, init_sources};
pub use run::{RunArgs, process_run};
pub use score::{ScoreArgs, process_score};
