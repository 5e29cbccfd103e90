//! remindr-core - Core library for Remindr
//!
//! This crate contains the reminder models, due-date classification, the
//! Supabase auth and table clients, and the screen handlers shared by the
//! Remindr interfaces.

pub mod auth;
pub mod board;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod session;
pub mod status;
pub mod store;
pub mod util;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Reminder, ReminderId};
