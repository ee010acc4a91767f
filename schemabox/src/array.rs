//! Homogeneous array container.

use std::ops::Deref;

use serde_json::Value;

use crate::error::{ParseError, Shape, ValidationError};
use crate::model::{Field, Model, Validate};

/// An ordered sequence of one model type.
///
/// Every element is constructed through `T::from_value`, so elements are
/// always typed models, never raw JSON. There are no cardinality
/// constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOf<T>(Vec<T>);

impl<T> ArrayOf<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for ArrayOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for ArrayOf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for ArrayOf<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for ArrayOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ArrayOf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Model> Validate for ArrayOf<T> {
    fn validate(&self) -> Vec<ValidationError> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                item.validate()
                    .into_iter()
                    .map(move |error| error.at_index(index))
            })
            .collect()
    }
}

impl<T: Model> Model for ArrayOf<T> {
    const SHAPE: Shape = Shape::Array;

    fn from_value(raw: &Value) -> Result<Self, ParseError> {
        match raw {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| T::from_value(item).map_err(|e| e.at_index(index)))
                .collect(),
            other => Err(ParseError::shape(Shape::Array, other)),
        }
    }

    fn serialize(&self) -> Value {
        Value::Array(self.0.iter().map(T::serialize).collect())
    }
}

impl<T: Model> Field for ArrayOf<T> {
    type Raw = Self;

    fn get(&self) -> &Self {
        self
    }

    fn set(&mut self, raw: Self) {
        *self = raw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxed::{IntKind, IntegerBox};
    use crate::error::PathSegment;
    use crate::model::FieldBox;
    use crate::validator::Validator;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Score(IntegerBox);

    impl FieldBox for Score {
        type Kind = IntKind;
        const VALIDATORS: &'static [Validator] = &[Validator::Maximum(100.0)];

        fn wrap(inner: IntegerBox) -> Self {
            Score(inner)
        }

        fn inner(&self) -> &IntegerBox {
            &self.0
        }

        fn inner_mut(&mut self) -> &mut IntegerBox {
            &mut self.0
        }
    }

    type Scores = ArrayOf<Score>;

    #[test]
    fn test_elements_are_constructed() {
        let scores = Scores::from_json("[1, 2, 3]").unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(*scores[1].get(), 2.0);
    }

    #[test]
    fn test_errors_are_prefixed_by_index() {
        let scores = Scores::from_json("[1, 200, 3, 300]").unwrap();
        let paths: Vec<_> = scores
            .validate()
            .into_iter()
            .map(|e| e.path.to_string())
            .collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
    }

    #[test]
    fn test_element_shape_error_carries_index() {
        match Scores::from_json("[1, \"two\"]") {
            Err(ParseError::Shape { path, .. }) => {
                assert_eq!(path.segments(), &[PathSegment::Index(1)]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_must_be_array() {
        assert!(matches!(Scores::from_json("{}"), Err(ParseError::Shape { .. })));
        assert!(matches!(Scores::from_json("[1,"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_null_is_empty() {
        let scores = Scores::from_value(&Value::Null).unwrap();
        assert!(scores.is_empty());
        assert_eq!(scores.serialize(), json!([]));
    }

    #[test]
    fn test_serialize_round_trip() {
        let scores = Scores::from_json("[5, 10]").unwrap();
        assert_eq!(scores.to_json(), "[5,10]");
        let again = Scores::from_json(&scores.to_json()).unwrap();
        assert_eq!(again, scores);
    }

    #[test]
    fn test_vec_like_surface() {
        let mut scores: Scores = (1..=2).map(|n| Score::with_value(f64::from(n))).collect();
        scores.push(Score::with_value(3.0));
        let total: f64 = scores.iter().map(|s| *s.get()).sum();
        assert_eq!(total, 6.0);
        assert_eq!(scores.into_iter().count(), 3);
    }
}
