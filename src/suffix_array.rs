// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use alloc::vec;
use alloc::vec::Vec;

use crate::sais::{self, ConstructionError};

/// A suffix array for a byte string.
pub struct SuffixArray<'a> {
    data: &'a [u8],
    inner: Vec<i32>,
}

impl<'a> SuffixArray<'a> {
    /// Creates a new `SuffixArray` for `data`.
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is longer than `i32::MAX` bytes or if
    /// an internal buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use saisort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"Hello, world!")?;
    /// # Ok::<(), saisort::ConstructionError>(())
    /// ```
    pub fn new(data: &'a [u8]) -> Result<Self, ConstructionError> {
        let mut inner = vec![0; data.len()];
        sais::suffix_array(data, &mut inner)?;

        Ok(Self { data, inner })
    }

    /// Returns the sorted suffix positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use saisort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"abab")?;
    ///
    /// assert_eq!(sa.positions(), &[2, 0, 3, 1]);
    /// # Ok::<(), saisort::ConstructionError>(())
    /// ```
    #[must_use]
    pub fn positions(&self) -> &[u32] {
        bytemuck::cast_slice(&self.inner)
    }

    /// Returns `true` if and only if `pattern` is contained in the associated data.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use saisort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(b"Hello, world!")?;
    /// assert!(sa.contains(b"world"));
    /// # Ok::<(), saisort::ConstructionError>(())
    /// ```
    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.inner
            .binary_search_by(|&suffix| {
                self.data[suffix as usize..]
                    .iter()
                    .take(pattern.len())
                    .cmp(pattern.iter())
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_one_match() {
        let sa = SuffixArray::new(b"Hello, world!").unwrap();

        assert!(sa.contains(b"world"));
    }

    #[test]
    fn contains_two_matches() {
        let sa =
            SuffixArray::new(b"The quick brown fox jumped over the lazy dog because the fox was quick")
                .unwrap();

        assert!(sa.contains(b"fox"));
        assert!(sa.contains(b"quick"));
    }

    #[test]
    fn contains_no_matches() {
        let sa = SuffixArray::new(b"Now is the time for all good men to come to the aid of the party")
            .unwrap();

        assert!(!sa.contains(b"times"));
    }

    #[test]
    fn empty_data() {
        let sa = SuffixArray::new(b"").unwrap();

        assert!(sa.positions().is_empty());
        assert!(!sa.contains(b"a"));
    }
}
