pub mod health;
pub mod journey;
