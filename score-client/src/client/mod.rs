pub mod api;
pub mod feedback;
