pub mod knowledge_base;
