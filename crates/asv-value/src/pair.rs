use crate::value::Val;

/// Two optional values held together.
///
/// The pair owns one reservation of each member; releasing the pair releases
/// both. Either member may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pair {
    first: Option<Val>,
    second: Option<Val>,
}

impl Pair {
    pub fn new(first: Option<Val>, second: Option<Val>) -> Self {
        Self { first, second }
    }

    /// A pair with both members present.
    pub fn of(first: Val, second: Val) -> Self {
        Self::new(Some(first), Some(second))
    }

    pub fn first(&self) -> Option<&Val> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&Val> {
        self.second.as_ref()
    }

    /// Take both members out of the pair.
    pub fn into_parts(self) -> (Option<Val>, Option<Val>) {
        (self.first, self.second)
    }

    /// Release both members, first then second, leaving the pair empty.
    pub fn release(&mut self) {
        if let Some(first) = self.first.take() {
            first.release();
        }
        if let Some(second) = self.second.take() {
            second.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_accessible() {
        let pair = Pair::of(Val::new(1i64), Val::new("two"));
        assert_eq!(pair.first().unwrap().as_integer(), Some(1));
        assert_eq!(pair.second().unwrap().as_str(), Some("two"));
    }

    #[test]
    fn release_empties_pair() {
        let a = Val::new(1i64);
        let mut pair = Pair::new(Some(a.reserve()), None);
        pair.release();
        assert_eq!(pair, Pair::default());
        assert_eq!(a.holders(), 1);
    }

    #[test]
    fn into_parts_transfers_ownership() {
        let a = Val::new(1i64);
        let pair = Pair::new(None, Some(a.reserve()));
        let (first, second) = pair.into_parts();
        assert!(first.is_none());
        assert!(Val::ptr_eq(&second.unwrap(), &a));
    }
}
