/// Domain layer for BOM reconciliation
///
/// Pure data-transformation logic: the component model and the services
/// that filter, merge, annotate and clean BOMs.
pub mod domain;
pub mod services;
