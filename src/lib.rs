//! Joke Battles backend.
//!
//! Fans a single user prompt out to four external joke-generation AI
//! services concurrently, collects one result per service with per-branch
//! failure containment, and runs a one-vote-per-session poll over which
//! service produced the best joke.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
