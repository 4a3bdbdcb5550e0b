/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the reconciliation services and coordinates
/// with infrastructure through ports.
pub mod dto;
pub mod read_models;
pub mod use_cases;
