/// Side effects requested by [`crate::update`] for the engine to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch both resources and commit a new snapshot.
    Refresh,
}
