//! Career Chat: a persona chat service with contact and question recording.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod notify;
pub mod profile;
pub mod tools;
pub mod web;
