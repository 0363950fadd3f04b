//! List item identity.

/// An element of a list view that can be selected by its identifier.
///
/// Identifiers must be stable for the lifetime of the item and unique within
/// the list they are shown in.
pub trait Identifiable {
    fn id(&self) -> &str;
}

impl Identifiable for String {
    fn id(&self) -> &str {
        self
    }
}

impl Identifiable for str {
    fn id(&self) -> &str {
        self
    }
}

impl<T: Identifiable + ?Sized> Identifiable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}
