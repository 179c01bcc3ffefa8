// Sales collateral generation: prompt composition, the completion call,
// and persistence of the result as a record.
// All completion calls go through llm_client; nothing here talks HTTP.

pub mod generator;
pub mod handlers;
pub mod prompts;
