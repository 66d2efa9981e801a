pub mod assistant;
pub mod prompt;
pub mod relay;
