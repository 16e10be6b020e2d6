#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Implements `TryFrom<$from>` for `$to` by matching a single variant, handing the
/// input back on failure.
macro_rules! try_from_variant {
    ($to:ty, $from:ident :: $variant:ident) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(f: $from) -> Result<$to, $from> {
                match f {
                    $from::$variant(x) => Ok(x),
                    other => Err(other),
                }
            }
        }
    };
}

