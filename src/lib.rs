//! Scam Honeypot - conversational engagement and fraud intelligence
//! extraction.
//!
//! Inbound scam messages are classified, answered by a synthetic persona and
//! mined for payment handles, bank accounts, phone numbers, links and names.
//! Conversation state advances through engagement phases by turn count
//! until the continuation policy ends it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
