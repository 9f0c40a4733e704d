use std::fmt::{Debug, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use num_traits::{PrimInt, Signed, ToPrimitive};

/// A trait for signed integer types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. The
/// index stores coordinates exactly as integers; distances are computed over
/// `f64`, so every implementor must convert losslessly enough for the tie
/// tolerance to be meaningful (all primitive signed integers do).
pub trait IndexCoord:
    private::Sealed
    + PrimInt
    + Signed
    + ToPrimitive
    + FromStr<Err = ParseIntError>
    + Display
    + Debug
    + Send
    + Sync
{
}

impl IndexCoord for i8 {}
impl IndexCoord for i16 {}
impl IndexCoord for i32 {}
impl IndexCoord for i64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}
