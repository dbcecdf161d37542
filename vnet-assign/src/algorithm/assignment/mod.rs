mod assignment_context;
mod assignment_error;
mod assignment_ops;
mod assignment_state;
mod exact_mf_assignment;
mod frank_wolfe_assignment;
pub mod line_search;
pub mod stop_rule;

pub use assignment_context::{AssignmentContext, AssignmentSummary};
pub use assignment_error::AssignmentError;
pub use assignment_state::AssignmentState;
pub use exact_mf_assignment::ExactMfAssignment;
pub use frank_wolfe_assignment::FrankWolfeAssignment;

use crate::{config::AssignmentMethod, model::virtual_network::VirtualNetwork};

/// one assignment run. `Err` means that no result was written.
pub trait Assignment {
    fn assign(&mut self) -> Result<AssignmentSummary, AssignmentError>;

    fn state(&self) -> AssignmentState;

    /// the virtual network of the run, once it has been built. dropped when a
    /// worker panics, as its flows are then incomplete.
    fn virtual_network(&self) -> Option<&VirtualNetwork>;
}

/// the assignment of the method configured in the context.
pub fn build_assignment(context: AssignmentContext) -> Box<dyn Assignment> {
    match context.parameters.method {
        AssignmentMethod::ExactMultiFlow => Box::new(ExactMfAssignment::new(context)),
        AssignmentMethod::FrankWolfe => Box::new(FrankWolfeAssignment::new(context)),
    }
}
