pub mod chat;
pub mod estimate;
pub mod feedback;
