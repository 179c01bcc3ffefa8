// Shared prompt constants for every completion call.
// Per-artifact prompt templates live in generation::prompts.

/// System role sent with every request.
pub const SALES_ASSISTANT_SYSTEM: &str = "You are an expert AI sales assistant.";
