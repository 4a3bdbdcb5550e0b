pub mod compare_with_tracker;
pub mod reconcile_bom;

pub use compare_with_tracker::CompareWithTrackerUseCase;
pub use reconcile_bom::ReconcileBomUseCase;
