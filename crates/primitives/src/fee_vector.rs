//! Fixed width vectors with one slot per gas [`Dimension`].
//!
//! [`GasVector`] carries gas amounts and always has every element. [`PriceVector`] carries
//! arbitrary precision fee values in wei, where any element may be absent. An absent
//! element stands for a dimension that has no fee yet, which is the case for data that
//! predates vector fee activation.
use alloy_primitives::U256;
use alloy_rlp::{BufMut, Decodable, Encodable, Header};
use core::{
    fmt,
    ops::{Add, Index, IndexMut, Sub},
    slice,
};
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

/// Number of gas dimensions.
pub const DIMENSIONS: usize = 3;

/// Gas dimension. The discriminant is the index of the dimension inside a [`FeeVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Dimension {
    /// Gas consumed by EVM execution.
    Execution = 0,
    /// Gas consumed by blob data.
    Blob = 1,
    /// Gas consumed by transaction calldata.
    Calldata = 2,
}

impl Dimension {
    /// All dimensions in vector order.
    pub const ALL: [Self; DIMENSIONS] = [Self::Execution, Self::Blob, Self::Calldata];

    /// Returns the index of the dimension inside a [`FeeVector`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lower case name of the dimension.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Execution => "execution",
            Self::Blob => "blob",
            Self::Calldata => "calldata",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict [`PriceVector`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VectorError {
    /// An operand has no value in the given dimension.
    AbsentElement {
        /// First dimension without a value.
        dimension: Dimension,
    },
}

impl core::error::Error for VectorError {}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbsentElement { dimension } => {
                write!(f, "fee vector contains absent element in {dimension} dimension")
            }
        }
    }
}

/// One value per gas dimension, ordered execution, blob, calldata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeVector<T>(pub [T; DIMENSIONS]);

/// Gas amounts per dimension.
pub type GasVector = FeeVector<u64>;

/// Fee values per dimension, each of which may be absent.
///
/// Equality (`==`) is the element-wise comparison where two absent elements are equal
/// and an absent element never equals a present one.
pub type PriceVector = FeeVector<Option<BigInt>>;

impl<T> FeeVector<T> {
    /// Creates a vector from its three elements.
    #[inline]
    pub const fn new(execution: T, blob: T, calldata: T) -> Self {
        Self([execution, blob, calldata])
    }

    /// Creates a vector by calling `f` once per dimension, in vector order.
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        Self([
            f(Dimension::Execution),
            f(Dimension::Blob),
            f(Dimension::Calldata),
        ])
    }

    /// Returns the element of the given dimension.
    #[inline]
    pub fn get(&self, dimension: Dimension) -> &T {
        &self.0[dimension.index()]
    }

    /// Returns an iterator over the elements in vector order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Applies `f` to every element.
    #[inline]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> FeeVector<U> {
        FeeVector(self.0.map(f))
    }

    /// Combines two vectors element-wise.
    pub fn zip_with<U, R>(
        &self,
        other: &FeeVector<U>,
        mut f: impl FnMut(&T, &U) -> R,
    ) -> FeeVector<R> {
        FeeVector::from_fn(|dimension| f(&self[dimension], &other[dimension]))
    }

    /// Consumes the vector and returns its elements.
    #[inline]
    pub fn into_inner(self) -> [T; DIMENSIONS] {
        self.0
    }
}

impl<T> From<[T; DIMENSIONS]> for FeeVector<T> {
    #[inline]
    fn from(value: [T; DIMENSIONS]) -> Self {
        Self(value)
    }
}

impl<T> Index<Dimension> for FeeVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, dimension: Dimension) -> &T {
        &self.0[dimension.index()]
    }
}

impl<T> IndexMut<Dimension> for FeeVector<T> {
    #[inline]
    fn index_mut(&mut self, dimension: Dimension) -> &mut T {
        &mut self.0[dimension.index()]
    }
}

impl<'a, T> IntoIterator for &'a FeeVector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl GasVector {
    /// Vector with every element set to zero.
    pub const ZERO: Self = Self([0; DIMENSIONS]);

    /// Element-wise addition wrapping around at `u64::MAX`.
    #[inline]
    pub fn wrapping_add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a.wrapping_add(*b))
    }

    /// Element-wise subtraction that floors every element at zero.
    #[inline]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a.saturating_sub(*b))
    }

    /// Converts gas amounts into a fully present [`PriceVector`].
    pub fn to_prices(&self) -> PriceVector {
        self.map(|a| Some(BigInt::from(a)))
    }

    fn payload_length(&self) -> usize {
        self.iter().map(Encodable::length).sum()
    }
}

impl Encodable for GasVector {
    fn encode(&self, out: &mut dyn BufMut) {
        Header {
            list: true,
            payload_length: self.payload_length(),
        }
        .encode(out);
        for value in self {
            value.encode(out);
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Decodable for GasVector {
    /// Decodes a list of exactly three integers.
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        if buf.len() < header.payload_length {
            return Err(alloy_rlp::Error::InputTooShort);
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);

        let execution = u64::decode(&mut payload)?;
        let blob = u64::decode(&mut payload)?;
        let calldata = u64::decode(&mut payload)?;
        if !payload.is_empty() {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: header.payload_length - payload.len(),
                got: header.payload_length,
            });
        }

        *buf = rest;
        Ok(Self::new(execution, blob, calldata))
    }
}

/// Converts a [`U256`] into a non-negative [`BigInt`].
#[inline]
pub fn bigint_from_u256(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

/// Converts a [`BigInt`] into a [`U256`].
///
/// Returns `None` if the value is negative or does not fit into 256 bits.
pub fn u256_from_bigint(value: &BigInt) -> Option<U256> {
    if value.is_negative() {
        return None;
    }
    let (_, bytes) = value.to_bytes_be();
    U256::try_from_be_slice(&bytes)
}

impl From<FeeVector<U256>> for PriceVector {
    fn from(value: FeeVector<U256>) -> Self {
        value.map(|v| Some(bigint_from_u256(v)))
    }
}

impl PriceVector {
    /// Vector with every element absent.
    #[inline]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Creates a fully present vector from `u64` values.
    pub fn from_u64s(execution: u64, blob: u64, calldata: u64) -> Self {
        Self::new(
            Some(BigInt::from(execution)),
            Some(BigInt::from(blob)),
            Some(BigInt::from(calldata)),
        )
    }

    /// Returns `true` if any element is absent.
    pub fn contains_absent(&self) -> bool {
        self.iter().any(Option::is_none)
    }

    /// Returns `true` if every element is absent.
    pub fn all_absent(&self) -> bool {
        self.iter().all(Option::is_none)
    }

    /// Returns `true` if every element has a bit length of zero. Absent elements count as zero.
    pub fn bits_all_zero(&self) -> bool {
        self.iter().flatten().all(|value| value.bits() == 0)
    }

    /// Returns the first dimension whose element is wider than `max_bits`.
    /// Absent elements never exceed the bound.
    pub fn first_wider_than(&self, max_bits: u64) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|d| self[*d].as_ref().is_some_and(|value| value.bits() > max_bits))
    }

    /// Returns `true` if no element is wider than `max_bits`.
    #[inline]
    pub fn bits_all_within(&self, max_bits: u64) -> bool {
        self.first_wider_than(max_bits).is_none()
    }

    /// Returns the first dimension where `self` is not less than or equal to `other`.
    ///
    /// Two absent elements compare as equal. An absent element is never less than or
    /// equal to a present one, nor the other way around.
    pub fn first_not_le(&self, other: &Self) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|d| match (&self[*d], &other[*d]) {
                (None, None) => false,
                (Some(a), Some(b)) => a > b,
                _ => true,
            })
    }

    /// Returns `true` if every element of `self` is less than or equal to `other`.
    #[inline]
    pub fn all_le(&self, other: &Self) -> bool {
        self.first_not_le(other).is_none()
    }

    /// Sums the present elements. Absent elements count as zero.
    pub fn sum(&self) -> BigInt {
        self.iter()
            .flatten()
            .fold(BigInt::zero(), |acc, value| acc + value)
    }

    /// Sums all elements, failing if any of them is absent.
    pub fn checked_sum(&self) -> Result<BigInt, VectorError> {
        let mut total = BigInt::zero();
        for dimension in Dimension::ALL {
            let Some(value) = &self[dimension] else {
                return Err(VectorError::AbsentElement { dimension });
            };
            total += value;
        }
        Ok(total)
    }

    /// Element-wise addition, failing if any element of either operand is absent.
    pub fn checked_add(&self, other: &Self) -> Result<Self, VectorError> {
        self.try_zip(other, |a, b| a + b)
    }

    /// Element-wise subtraction, failing if any element of either operand is absent.
    /// Results may be negative.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, VectorError> {
        self.try_zip(other, |a, b| a - b)
    }

    /// Element-wise subtraction flooring every element at zero, failing if any element
    /// of either operand is absent.
    pub fn checked_sub_clamped(&self, other: &Self) -> Result<Self, VectorError> {
        self.try_zip(other, |a, b| {
            if a > b {
                a - b
            } else {
                BigInt::zero()
            }
        })
    }

    /// Element-wise multiplication, failing if any element of either operand is absent.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, VectorError> {
        self.try_zip(other, |a, b| a * b)
    }

    fn try_zip(
        &self,
        other: &Self,
        mut op: impl FnMut(&BigInt, &BigInt) -> BigInt,
    ) -> Result<Self, VectorError> {
        let mut out = Self::absent();
        for dimension in Dimension::ALL {
            let (Some(a), Some(b)) = (&self[dimension], &other[dimension]) else {
                return Err(VectorError::AbsentElement { dimension });
            };
            out[dimension] = Some(op(a, b));
        }
        Ok(out)
    }

    fn lenient_zip(&self, other: &Self, op: impl Fn(&BigInt, &BigInt) -> BigInt) -> Self {
        let zero = BigInt::zero();
        self.zip_with(other, |a, b| match (a, b) {
            (None, None) => None,
            (a, b) => Some(op(a.as_ref().unwrap_or(&zero), b.as_ref().unwrap_or(&zero))),
        })
    }
}

/// Element-wise addition. A single absent operand counts as zero, two absent
/// operands stay absent.
impl Add for &PriceVector {
    type Output = PriceVector;

    fn add(self, other: Self) -> PriceVector {
        self.lenient_zip(other, |a, b| a + b)
    }
}

/// Element-wise subtraction. A single absent operand counts as zero, two absent
/// operands stay absent. Results may be negative.
impl Sub for &PriceVector {
    type Output = PriceVector;

    fn sub(self, other: Self) -> PriceVector {
        self.lenient_zip(other, |a, b| a - b)
    }
}
