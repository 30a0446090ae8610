//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing

use proptest::{
    prop_assert_eq,
    test_runner::{TestCaseError, TestCaseResult},
};

/// Represents an input generated for testing purposes.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}

impl<T, U> Input<Option<T>> for Option<U>
where
    U: Input<T>,
{
    fn assert(self, output: Option<T>) -> TestCaseResult {
        match (self, output) {
            (Some(input), Some(output)) => input.assert(output),
            (None, None) => Ok(()),
            (Some(_), None) => Err(TestCaseError::fail("expected Some, found None")),
            (None, Some(_)) => Err(TestCaseError::fail("expected None, found Some")),
        }
    }
}

impl<'a, T, U> Input<&'a [T]> for &[U]
where
    for<'b> &'b U: Input<&'a T>,
{
    fn assert(self, output: &'a [T]) -> TestCaseResult {
        prop_assert_eq!(self.len(), output.len(), "number of elements differs");

        for (index, (input, output)) in self.iter().zip(output).enumerate() {
            input
                .assert(output)
                .map_err(|error| TestCaseError::fail(format!("at element {index}: {error}")))?;
        }

        Ok(())
    }
}

impl<'a, T, U> Input<&'a [T]> for &Vec<U>
where
    for<'b> &'b U: Input<&'a T>,
{
    fn assert(self, output: &'a [T]) -> TestCaseResult { self.as_slice().assert(output) }
}
