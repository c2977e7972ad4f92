//! Normalization of concealment targets.
//!
//! [`Namespace::conceal`](crate::Namespace::conceal) accepts one name,
//! several names, or a sequence of names; this trait flattens each shape to
//! the list of individual names the underlying visibility restriction is
//! applied to.

/// A value that names one or more members to conceal.
pub trait ConcealTargets {
    /// Flatten into the individual member names, in order.
    fn into_names(self) -> Vec<String>;
}

impl ConcealTargets for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl ConcealTargets for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>, const N: usize> ConcealTargets for [S; N] {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> ConcealTargets for &[S] {
    fn into_names(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<S: Into<String>> ConcealTargets for Vec<S> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_name() {
        assert_eq!("one".into_names(), vec!["one"]);
        assert_eq!(String::from("one").into_names(), vec!["one"]);
    }

    #[test]
    fn test_array_of_names() {
        assert_eq!(["one", "two"].into_names(), vec!["one", "two"]);
    }

    #[test]
    fn test_slice_and_vec_of_names() {
        let names = ["one".to_owned(), "two".to_owned()];
        assert_eq!(names.as_slice().into_names(), vec!["one", "two"]);
        assert_eq!(vec!["one", "two"].into_names(), vec!["one", "two"]);
    }
}
