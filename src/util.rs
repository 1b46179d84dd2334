use num::PrimInt;

/// Calculate ceil(a / b).
pub fn div_ceil<T: PrimInt>(a: T, b: T) -> T {
    a / b + if a % b == T::zero() { T::zero() } else { T::one() }
}
