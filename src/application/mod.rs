// Application layer - Use cases and seams to external collaborators
pub mod chart_backend;
pub mod chart_service;
pub mod exporter;
pub mod forecast_repository;
pub mod session_manager;
