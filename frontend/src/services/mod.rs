pub mod api;
pub mod dates;
