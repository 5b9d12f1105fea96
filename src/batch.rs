//! Batch driver: whole-series computation as a fold of the streaming update.

use crate::Indicator;

/// Calls [`Indicator::update`] on every input in order and collects each
/// output.
///
/// The indicator's state carries over: call [`Indicator::reset`] first for a
/// computation independent of earlier updates. The output has exactly one
/// element per input.
///
/// # Example
///
/// ```
/// use pulse_ta::{Indicator, Sma, SmaConfig, batch};
///
/// let mut sma = Sma::new(SmaConfig::new(2).unwrap());
/// let out = batch::run(&mut sma, [2.0, 4.0, 6.0]);
///
/// assert_eq!(out, vec![1.0, 3.0, 5.0]);
/// assert_eq!(sma.get(), 5.0);
/// ```
pub fn run<T, I>(indicator: &mut T, inputs: I) -> Vec<T::Output>
where
    T: Indicator,
    I: IntoIterator<Item = T::Input>,
{
    let inputs = inputs.into_iter();
    let mut outputs = Vec::with_capacity(inputs.size_hint().0);

    outputs.extend(inputs.map(|input| indicator.update(input)));

    tracing::trace!(indicator = %indicator, len = outputs.len(), "batch run");

    outputs
}
