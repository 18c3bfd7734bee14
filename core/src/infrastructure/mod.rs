pub mod llm;
pub mod scratch;
