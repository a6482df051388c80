/// Sort order of a single key: direction plus null placement.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    AscNullsFirst,
    AscNullsLast,
    DescNullsFirst,
    DescNullsLast,
}

impl SortOrder {
    #[inline]
    pub fn new(ascending: bool, nulls_first: bool) -> Self {
        match (ascending, nulls_first) {
            (true, true) => SortOrder::AscNullsFirst,
            (true, false) => SortOrder::AscNullsLast,
            (false, true) => SortOrder::DescNullsFirst,
            (false, false) => SortOrder::DescNullsLast,
        }
    }

    #[inline]
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::AscNullsFirst | SortOrder::AscNullsLast)
    }

    #[inline]
    pub fn is_nulls_first(&self) -> bool {
        matches!(self, SortOrder::AscNullsFirst | SortOrder::DescNullsFirst)
    }

    /// Flip direction and keep null placement.
    #[inline]
    pub fn reverse(&self) -> Self {
        SortOrder::new(!self.is_ascending(), self.is_nulls_first())
    }
}

impl Default for SortOrder {
    #[inline]
    fn default() -> Self {
        SortOrder::AscNullsFirst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_flags() {
        for (asc, nf) in [(true, true), (true, false), (false, true), (false, false)] {
            let so = SortOrder::new(asc, nf);
            assert_eq!(asc, so.is_ascending());
            assert_eq!(nf, so.is_nulls_first());
            assert_eq!(!asc, so.reverse().is_ascending());
            assert_eq!(nf, so.reverse().is_nulls_first());
        }
        assert_eq!(SortOrder::AscNullsFirst, SortOrder::default());
    }
}
