/// Control actions supported by the transient solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the samples reached so far.
    StopEarly,
}
