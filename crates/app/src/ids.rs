//! Typed Ids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Store-assigned `BIGSERIAL` identity, tagged with the type it identifies.
pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedId<T> {
    pub const fn from_i64(id: i64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }

    /// Ids are only ever assigned by the store, starting at 1.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(value: TypedId<T>) -> Self {
        value.into_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn only_positive_ids_are_assigned() {
        assert!(TypedId::<Marker>::from_i64(1).is_assigned());
        assert!(!TypedId::<Marker>::from_i64(0).is_assigned());
        assert!(!TypedId::<Marker>::from_i64(-4).is_assigned());
    }

    #[test]
    fn ordering_follows_the_raw_id() {
        let low = TypedId::<Marker>::from_i64(2);
        let high = TypedId::<Marker>::from_i64(10);

        assert!(low < high);
        assert_eq!(i64::from(high), 10);
    }
}
