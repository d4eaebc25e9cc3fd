pub mod health;
pub mod mood;
