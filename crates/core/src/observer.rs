/// Receives events from a solver and optionally steers it.
///
/// Solvers emit an event of type `E` at well-defined points (for example,
/// after each accepted integration step). Returning `Some(action)` asks the
/// solver to act on it; returning `None` lets the solver continue.
///
/// Implemented for `()` (ignore everything) and for any
/// `FnMut(&E) -> Option<A>` closure.
pub trait Observer<E, A> {
    /// Observes a single event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
