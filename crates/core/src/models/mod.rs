pub mod cadence;
pub mod news;
pub mod price;
pub mod request;
pub mod settings;
pub mod simulation;
