//! Data models for taskboard
//!
//! Core abstractions:
//! - User / `AuthSession`: who is logged in and with which token
//! - Task: "What needs to be done" (with a board status)

pub mod task;
pub mod user;

pub use task::{Task, TaskCreate, TaskStatus, TaskUpdate};
pub use user::{AuthResponse, AuthSession, Credentials, MessageResponse, Registration, User};
