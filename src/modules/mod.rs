pub mod creation;
pub mod formatter;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod storage;
