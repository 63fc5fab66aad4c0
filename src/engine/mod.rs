pub mod engine;
pub mod protocol;

pub mod generator;
pub mod llm_client;
pub mod prompt_builder;
pub mod schema;
