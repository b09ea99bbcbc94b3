use std::rc::Rc;
use std::sync::Arc;

/// Instance identity, as opposed to structural equality.
///
/// Two handles are the same when they designate the same underlying object. Shared pointers
/// compare by address. Strings are plain values and compare by content.
pub trait Identity {
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl Identity for str {
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Identity for String {
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Identity + ?Sized> Identity for &T {
    fn is_same(&self, other: &Self) -> bool {
        T::is_same(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(this), Some(other)) => this.is_same(other),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_identity_ignores_content() {
        let a = Rc::new(5);
        let b = Rc::new(5);

        assert!(a.is_same(&Rc::clone(&a)));
        assert!(!a.is_same(&b));
    }

    #[test]
    fn absent_handles_are_the_same() {
        let none: Option<Rc<u8>> = None;
        assert!(none.is_same(&None));
        assert!(!none.is_same(&Some(Rc::new(0))));
    }
}
