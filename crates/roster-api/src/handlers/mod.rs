//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod celebrities;
pub mod health;
pub mod mbti;
pub mod search;
pub mod votes;
