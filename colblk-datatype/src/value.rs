use smallvec::SmallVec;

/// Value is the boxed representation of a single non-null
/// fixed-width value, decoded out of its binary form.
///
/// Doubles are equal iff their bit patterns are equal, matching the
/// total order used to compare encoded doubles: NaN equals itself
/// and `-0.0` differs from `0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Long(i64),
    Double(f64),
    Bytes(SmallVec<[u8; 16]>),
}

impl Value {
    #[inline]
    pub fn bytes(bs: &[u8]) -> Self {
        Value::Bytes(SmallVec::from_slice(bs))
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        match (self, rhs) {
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Long(l), Value::Long(r)) => l == r,
            (Value::Double(l), Value::Double(r)) => l.to_bits() == r.to_bits(),
            (Value::Bytes(l), Value::Bytes(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Value::bytes(value)
    }
}
