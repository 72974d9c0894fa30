pub mod advisor;
pub mod controller;
pub mod error;
pub mod event;
pub mod feedback;
pub mod harvest;
pub mod io;
pub mod log;
pub mod messages;
pub mod orchestrator;
pub mod render;
pub mod schedule;
pub mod session;
pub mod stage;
pub mod types;

pub use error::{Result, TanimanError};
