pub mod connection;
pub mod desk;
pub mod repositories;
pub mod wire;

pub use connection::{connect, HttpBackend};
pub use desk::{FrontDesk, ListOutcome, BACKEND_UNAVAILABLE_NOTICE};
