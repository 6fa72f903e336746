/// Builds an alternative list type from a flat list of types.
///
/// `alternatives![A, B, C]` expands to `Cons<A, Cons<B, Cons<C, Nil>>>`.
///
/// # Example
///
/// ```rust
/// use halo_variant::{alternatives, Variant};
///
/// type Value = Variant<alternatives![i64, String, bool]>;
///
/// let v = Value::new(true);
/// assert_eq!(v.which(), 2);
/// ```
#[macro_export]
macro_rules! alternatives {
    () => {
        $crate::Nil
    };
    ($head:ty $(, $tail:ty)* $(,)?) => {
        $crate::Cons<$head, $crate::alternatives![$($tail),*]>
    };
}

#[cfg(feature = "tracing")]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub(crate) use log_error;
pub(crate) use log_trace;
