pub mod document;
pub mod generation_params;
pub mod llm_decode;
