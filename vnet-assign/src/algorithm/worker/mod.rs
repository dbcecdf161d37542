mod assignment_worker;
mod exact_multi_flow_strategy;
mod frank_wolfe_strategy;
mod worker_context;
mod worker_strategy;

pub use assignment_worker::{AssignmentWorker, AssignmentWorkerParameters, WorkerOutcome};
pub use exact_multi_flow_strategy::ExactMultiFlowStrategy;
pub use frank_wolfe_strategy::FrankWolfeStrategy;
pub use worker_context::WorkerContext;
pub use worker_strategy::WorkerStrategy;
