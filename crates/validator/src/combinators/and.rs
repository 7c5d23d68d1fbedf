//! Conjunction of validators: every rule must pass, the first failure wins.

use crate::foundation::{Validate, ValidationError};

/// Runs `L`, then `R` on the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R>(pub(crate) L, pub(crate) R);

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.0.validate(input).and_then(|()| self.1.validate(input))
    }
}

pub fn and<L, R>(left: L, right: R) -> And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    And(left, right)
}

/// A chain of same-typed validators assembled at runtime, e.g. from the
/// constraint list of a form field.
#[derive(Debug, Clone)]
pub struct Chain<V> {
    links: Vec<V>,
}

impl<V> Chain<V> {
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    pub fn push(&mut self, validator: V) {
        self.links.push(validator);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// An empty chain accepts everything.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<V> for Chain<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl<V: Validate> Validate for Chain<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.links.iter().try_for_each(|link| link.validate(input))
    }
}

pub fn chain<V: Validate>(validators: impl IntoIterator<Item = V>) -> Chain<V> {
    validators.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::validators::{MinLength, max_length, min_length, not_empty};
    use pretty_assertions::assert_eq;

    #[test]
    fn and_stops_at_first_failure() {
        let password = not_empty().and(min_length(6)).and(max_length(8));

        assert!(password.validate("123456").is_ok());
        assert_eq!(password.validate("").unwrap_err().code, "not_empty");
        assert_eq!(password.validate("abc").unwrap_err().code, "min_length");
        assert_eq!(password.validate("123456789").unwrap_err().code, "max_length");
    }

    #[test]
    fn chain_runs_in_order() {
        let rules = chain([min_length(3), min_length(5), min_length(7)]);
        assert_eq!(rules.len(), 3);
        assert!(rules.validate("helloworld").is_ok());
        assert_eq!(rules.validate("hi").unwrap_err().param("min"), Some("3"));
        assert_eq!(rules.validate("hello").unwrap_err().param("min"), Some("7"));
    }

    #[test]
    fn empty_chain_accepts_anything() {
        let mut rules = Chain::<MinLength>::new();
        assert!(rules.is_empty());
        assert!(rules.validate("").is_ok());

        rules.push(min_length(1));
        assert!(rules.validate("").is_err());
    }
}
