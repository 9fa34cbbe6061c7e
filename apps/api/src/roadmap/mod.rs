// Roadmap Generation Pipeline
// Implements: request building, provider call with retry, envelope validation,
// diagram directive rewriting.
// All provider calls go through llm_client — no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod request_builder;
pub mod transformer;
pub mod validator;

#[cfg(test)]
pub mod testing;
