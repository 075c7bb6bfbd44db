//! Helpers over the standard [`Result`] and [`Option`] containers.
//!
//! Expected failures are always carried as values. The only way to turn an absent value into a
//! hard failure is [`Require::require`], which is reserved for wiring mistakes.

/// Indicates that a value was accessed while absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("empty value accessed")]
pub struct EmptyValue;

/// Collapse both arms of a container into a single value.
pub trait Fold {
    /// The value of the present/success arm.
    type Value;
    /// The payload of the absent/failure arm.
    type Other;

    /// Apply `on_value` to the present/success arm, or `on_other` to the other arm.
    fn fold<U>(
        self,
        on_value: impl FnOnce(Self::Value) -> U,
        on_other: impl FnOnce(Self::Other) -> U,
    ) -> U;
}

impl<T, E> Fold for Result<T, E> {
    type Value = T;
    type Other = E;

    fn fold<U>(
        self,
        on_value: impl FnOnce(Self::Value) -> U,
        on_other: impl FnOnce(Self::Other) -> U,
    ) -> U {
        match self {
            Ok(value) => on_value(value),
            Err(error) => on_other(error),
        }
    }
}

impl<T> Fold for Option<T> {
    type Value = T;
    type Other = ();

    fn fold<U>(
        self,
        on_value: impl FnOnce(Self::Value) -> U,
        on_other: impl FnOnce(Self::Other) -> U,
    ) -> U {
        match self {
            Some(value) => on_value(value),
            None => on_other(()),
        }
    }
}

/// Fail-fast access to a value that must be present.
pub trait Require<T> {
    /// Returns the value, or [`EmptyValue`] if absent.
    fn try_require(self) -> Result<T, EmptyValue>;

    /// Returns the value, panicking with [`EmptyValue`] if absent.
    ///
    /// Absence here is a defect in how the caller was wired, never a user input problem.
    #[track_caller]
    fn require(self) -> T
    where
        Self: Sized,
    {
        match self.try_require() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Require<T> for Option<T> {
    fn try_require(self) -> Result<T, EmptyValue> {
        self.ok_or(EmptyValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_result() {
        let ok: Result<u32, String> = Ok(2);
        assert_eq!(ok.fold(|v| v * 2, |_| 0), 4);

        let err: Result<u32, String> = Err("bad".to_string());
        assert_eq!(err.fold(|_| String::new(), |e| e), "bad");
    }

    #[test]
    fn test_fold_option() {
        assert_eq!(Some(3).fold(|v| v + 1, |()| 0), 4);
        assert_eq!(None::<u32>.fold(|v| v + 1, |()| 0), 0);
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut called = false;
        let err: Result<u32, String> = Err("first".to_string());
        let out = err.and_then(|v| {
            called = true;
            Ok::<_, String>(v + 1)
        });
        assert_eq!(out, Err("first".to_string()));
        assert!(!called);
    }

    #[test]
    fn test_try_require() {
        assert_eq!(Some(5).try_require(), Ok(5));
        assert_eq!(None::<u8>.try_require(), Err(EmptyValue));
    }

    #[test]
    #[should_panic(expected = "empty value accessed")]
    fn test_require_absent_panics() {
        let _ = None::<u8>.require();
    }
}
