use std::{fmt, iter::Sum, ops::Add};

/// The declared encoded size of a codec.
///
/// Composite codecs read a child's stride to decide whether its bytes need a varint
/// length in front of them: fixed-stride children are written raw, variable-stride
/// children are length-prefixed.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub enum Stride {
    /// Every value encodes to exactly this many bytes.
    Fixed(usize),
    /// The encoded size depends on the value.
    Variable,
}

use Stride::*;

impl Stride {
    /// Is this a [`Stride::Fixed`]?
    pub fn is_fixed(self) -> bool {
        match self {
            Fixed(_) => true,
            Variable => false,
        }
    }

    /// Is this [`Stride::Variable`]?
    pub fn is_variable(self) -> bool { !self.is_fixed() }

    /// The fixed size, if there is one.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Fixed(n) => Some(n),
            Variable => None,
        }
    }
}

/// Two strides laid end to end: fixed only if both are.
impl Add for Stride {
    type Output = Stride;

    fn add(self, other: Stride) -> Stride {
        match (self, other) {
            (Fixed(a), Fixed(b)) => Fixed(a + b),
            _ => Variable,
        }
    }
}

impl Sum for Stride {
    fn sum<I: Iterator<Item = Stride>>(iter: I) -> Stride { iter.fold(Fixed(0), Add::add) }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fixed(n) => write!(f, "{} bytes", n),
            Variable => write!(f, "variable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums() {
        assert_eq!(vec![Fixed(1), Fixed(2), Fixed(4)].into_iter().sum::<Stride>(), Fixed(7));
        assert_eq!(vec![Fixed(1), Variable, Fixed(4)].into_iter().sum::<Stride>(), Variable);
        assert_eq!(Vec::<Stride>::new().into_iter().sum::<Stride>(), Fixed(0));
    }

    #[test]
    fn accessors() {
        assert!(Fixed(0).is_fixed());
        assert!(Variable.is_variable());
        assert_eq!(Fixed(3).fixed(), Some(3));
        assert_eq!(Variable.fixed(), None);
    }
}
