/// Ports module defining interfaces for hexagonal architecture
///
/// The reconciliation core drives every external system through the
/// outbound ports defined here.
pub mod outbound;
