// Pipelines: multi-text workflows built on the engine.

pub mod batch;
