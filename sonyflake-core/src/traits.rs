//! base traits for implementing helper code
//!
//! good use case could be for writing code that takes any generator, a
//! thread safe one or a mock in tests

/// basics of an id generator
///
/// describes what is needed to be considered an IdGenerator. the
/// `Generator` in sonyflake-gen implements this trait as an example
pub trait IdGenerator {
    /// the potential error that could be returned from next_id
    type Error;

    /// the actual Id type that is returned from next_id
    type Id;

    /// to help with allowing for different situations, Output can be
    /// whatever is needed. a [`Result`](std::result::Result) or if used in
    /// an async context then an impl of [`Future`](core::future::Future)
    type Output;

    /// call to get the next available id
    fn next_id(&self) -> Self::Output;
}

/// basic id structure
pub trait Id {
    /// what the id can be turned to and from
    type BaseType;

    /// creates a value of BaseType from the id
    fn id(&self) -> Self::BaseType;
}
