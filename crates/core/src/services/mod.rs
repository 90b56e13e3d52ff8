pub mod price_service;
pub mod schedule_service;
pub mod sentiment_service;
pub mod simulation_service;
pub mod synthetic;
