//! Core Entity Trait
//!
//! Identity contract for backend-owned entities.

/// Anything the backend stores and identifies by id.
///
/// Ids are assigned only by the backend, so an entity built on the client
/// side has none until the server echoes it back.
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash;

    /// Returns the entity's identifier, if the backend has assigned one
    fn id(&self) -> Option<Self::Id>;
}
