/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod reconcile_request;
mod reconcile_response;
mod run_status;

pub use reconcile_request::{BomInputKind, ManualComponent, ReconcileRequest, DEFAULT_OUTPUT_SUFFIX};
pub use reconcile_response::ReconcileResponse;
pub use run_status::{Degradation, RunStatus};
