pub mod answer_set;
pub mod config;
pub mod state;
