// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Construction drivers: argument validation, the byte-alphabet entry,
//! and the integer-alphabet core that the reduced problems recurse into.
//!
//! The byte entry allocates the only heap buffer (an 8 KiB bucket table);
//! the integer core carves its bucket table out of the workspace slack
//! whenever `fs / k` permits, picking the fastest layout that fits:
//! 6k, 4k, 2k, or the allocation-fallback 1k configuration.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::buckets;
use crate::classify;
use crate::compact;
use crate::finalize;
use crate::partial;
use crate::radix;
use crate::rename;

/// The size of the byte alphabet
pub(crate) const ALPHABET_SIZE: usize = 256;

/// Secondary class marker used by the 4k layout, one bit below the sign
pub(crate) const SUFFIX_GROUP_MARKER: i32 = 1 << 30;

#[inline(always)]
pub(crate) fn bkt2(c: i32, s: bool) -> usize {
    ((c as usize) << 1) + s as usize
}

#[inline(always)]
pub(crate) fn bkt4(c: i32, s: u32) -> usize {
    ((c as usize) << 2) + s as usize
}

/// An error indicating that constructing a suffix array or BWT failed.
///
/// All variants are reported before or instead of producing output; no
/// partial result is ever returned.
///
/// # Examples
///
/// ```
/// use saisort::ConstructionError;
///
/// let text = b"abracadabra";
/// let mut sa = [0i32; 4];
/// let result = saisort::suffix_array(text, &mut sa);
///
/// assert!(matches!(
///     result,
///     Err(ConstructionError::WorkspaceTooSmall { needed: 11, available: 4 })
/// ));
/// ```
#[derive(Debug, Eq, PartialEq)]
pub enum ConstructionError {
    /// The index workspace cannot hold one entry per text byte
    WorkspaceTooSmall {
        /// Entries required (the text length)
        needed: usize,
        /// Entries available
        available: usize,
    },
    /// The text and workspace exceed the 31-bit index domain
    LengthOverflow(usize),
    /// An internal bucket buffer could not be allocated
    OutOfMemory,
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConstructionError::WorkspaceTooSmall { needed, available } => {
                write!(f, "workspace of {available} entries cannot hold {needed}")
            }
            ConstructionError::LengthOverflow(len) => {
                write!(f, "length {len} exceeds the 31-bit index domain")
            }
            ConstructionError::OutOfMemory => write!(f, "bucket buffer allocation failed"),
        }
    }
}

impl core::error::Error for ConstructionError {}

/// Computes the suffix array of `text` into `sa[..text.len()]`.
///
/// `sa` may be longer than the text; the engine uses the extra capacity
/// as scratch space, which speeds up the recursive sorting steps. The
/// contents of the extra slots are unspecified afterwards. The result is
/// identical for every workspace size.
///
/// # Errors
///
/// Returns [`ConstructionError::WorkspaceTooSmall`] if `sa` is shorter
/// than `text`, [`ConstructionError::LengthOverflow`] if `sa` has more
/// than `i32::MAX` entries, and [`ConstructionError::OutOfMemory`] if an
/// internal buffer cannot be allocated.
///
/// # Examples
///
/// ```
/// let text = b"banana";
/// let mut sa = [0i32; 6];
/// saisort::suffix_array(text, &mut sa)?;
///
/// assert_eq!(sa, [5, 3, 1, 0, 4, 2]);
/// # Ok::<(), saisort::ConstructionError>(())
/// ```
pub fn suffix_array(text: &[u8], sa: &mut [i32]) -> Result<(), ConstructionError> {
    let n = text.len();
    if sa.len() < n {
        return Err(ConstructionError::WorkspaceTooSmall {
            needed: n,
            available: sa.len(),
        });
    }
    if sa.len() > i32::MAX as usize {
        return Err(ConstructionError::LengthOverflow(sa.len()));
    }
    if n < 2 {
        if n == 1 {
            sa[0] = 0;
        }
        return Ok(());
    }

    let fs = (sa.len() - n) as i32;
    solve_bytes(text, sa, n as i32, fs, false).map(|_| ())
}

/// Computes the Burrows-Wheeler transform of `text` into
/// `out[..text.len()]` and returns the primary index.
///
/// The transform is laid out with `out[0] = text[text.len() - 1]`; the
/// primary index is the row of the sorted rotation matrix holding the
/// text itself under that convention, so it lies in `[1, text.len()]`
/// for non-empty texts (and is 0 for an empty one). `work` is used as
/// scratch and left in an unspecified state.
///
/// # Errors
///
/// Returns [`ConstructionError::WorkspaceTooSmall`] if `out` or `work`
/// is shorter than `text`, [`ConstructionError::LengthOverflow`] if
/// `work` has more than `i32::MAX` entries, and
/// [`ConstructionError::OutOfMemory`] if an internal buffer cannot be
/// allocated.
///
/// # Examples
///
/// ```
/// let text = b"banana";
/// let mut out = [0u8; 6];
/// let mut work = [0i32; 6];
/// let primary = saisort::bwt(text, &mut out, &mut work)?;
///
/// assert_eq!(&out, b"annbaa");
/// assert_eq!(primary, 4);
/// # Ok::<(), saisort::ConstructionError>(())
/// ```
pub fn bwt(text: &[u8], out: &mut [u8], work: &mut [i32]) -> Result<usize, ConstructionError> {
    let n = text.len();
    if out.len() < n {
        return Err(ConstructionError::WorkspaceTooSmall {
            needed: n,
            available: out.len(),
        });
    }
    if work.len() < n {
        return Err(ConstructionError::WorkspaceTooSmall {
            needed: n,
            available: work.len(),
        });
    }
    if work.len() > i32::MAX as usize {
        return Err(ConstructionError::LengthOverflow(work.len()));
    }
    if n == 0 {
        return Ok(0);
    }
    if n == 1 {
        out[0] = text[0];
        return Ok(1);
    }

    let fs = (work.len() - n) as i32;
    let index = solve_bytes(text, work, n as i32, fs, true)? as usize;

    out[0] = text[n - 1];
    bwt_copy(&mut out[1..=index], &work[..index]);
    bwt_copy(&mut out[index + 1..n], &work[index + 1..n]);

    Ok(index + 1)
}

/// Computes the Burrows-Wheeler transform of `data` in place, replacing
/// it with the transform, and returns the primary index.
///
/// Equivalent to [`bwt`] with the text buffer doubling as the output
/// buffer; the two produce byte-identical transforms.
///
/// # Errors
///
/// See [`bwt`].
///
/// # Examples
///
/// ```
/// let mut data = *b"banana";
/// let mut work = [0i32; 6];
/// let primary = saisort::bwt_in_place(&mut data, &mut work)?;
///
/// assert_eq!(&data, b"annbaa");
/// assert_eq!(primary, 4);
/// # Ok::<(), saisort::ConstructionError>(())
/// ```
pub fn bwt_in_place(data: &mut [u8], work: &mut [i32]) -> Result<usize, ConstructionError> {
    let n = data.len();
    if work.len() < n {
        return Err(ConstructionError::WorkspaceTooSmall {
            needed: n,
            available: work.len(),
        });
    }
    if work.len() > i32::MAX as usize {
        return Err(ConstructionError::LengthOverflow(work.len()));
    }
    if n <= 1 {
        return Ok(n);
    }

    let fs = (work.len() - n) as i32;
    let index = solve_bytes(data, work, n as i32, fs, true)? as usize;

    let last = data[n - 1];
    bwt_copy(&mut data[1..=index], &work[..index]);
    bwt_copy(&mut data[index + 1..n], &work[index + 1..n]);
    data[0] = last;

    Ok(index + 1)
}

fn bwt_copy(out: &mut [u8], work: &[i32]) {
    for (u, &a) in out.iter_mut().zip(work) {
        *u = a as u8;
    }
}

fn alloc_buckets(len: usize) -> Result<Vec<i32>, ConstructionError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ConstructionError::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Byte-alphabet driver. Returns the raw primary slot in BWT mode, 0 in
/// suffix-array mode. Requires `n >= 2`.
fn solve_bytes(
    text: &[u8],
    sa: &mut [i32],
    n: i32,
    fs: i32,
    bwt: bool,
) -> Result<i32, ConstructionError> {
    let mut buckets = alloc_buckets(8 * ALPHABET_SIZE)?;
    let buckets = &mut buckets[..];

    let m = classify::count_and_gather_lms_bytes(text, sa, n, buckets);
    buckets::init_start_end_bytes(buckets);

    if m > 0 {
        let first_lms = sa[(n - m) as usize];
        let left_count = buckets::init_for_lms_radix_bytes(text, buckets, first_lms);

        radix::radix_sort_lms_bytes(text, sa, n, m, buckets);
        buckets::init_for_partial_bytes(text, buckets, first_lms, left_count);
        partial::induce_partial_order_bytes(text, sa, n, buckets, first_lms, left_count);

        let names = rename::renumber_and_gather_lms_bytes(sa, n, m, fs);
        if names < m {
            {
                let (sa_rec, text_rec) = sa.split_at_mut((n + fs - m) as usize);
                solve_ints(text_rec, sa_rec, m, names, fs + n - 2 * m)?;
            }

            classify::gather_lms_bytes(text, sa, n);
            compact::reconstruct_lms(sa, n, m);
        }

        finalize::place_lms_interval_bytes(sa, n, m, buckets);
    } else {
        sa[..n as usize].fill(0);
    }

    Ok(finalize::induce_final_order_bytes(text, sa, n, bwt, buckets))
}

/// Runs `body` with the workspace and the 1k bucket row, which lives in
/// the workspace tail when the slack allows and in `fallback` otherwise.
fn with_buckets_1k<R>(
    sa: &mut [i32],
    fallback: &mut Option<Vec<i32>>,
    base: usize,
    body: impl FnOnce(&mut [i32], &mut [i32]) -> R,
) -> R {
    match fallback {
        Some(buf) => body(sa, buf),
        None => {
            let (sa_w, bkts) = sa.split_at_mut(base);
            body(sa_w, bkts)
        }
    }
}

/// Integer-alphabet core. `text` is restored on success; `sa` must hold
/// `n + fs` entries. Requires `n >= 2` and symbols in `[0, k)`.
pub(crate) fn solve_ints(
    text: &mut [i32],
    sa: &mut [i32],
    n: i32,
    k: i32,
    fs: i32,
) -> Result<(), ConstructionError> {
    if k > 0 && fs / k >= 6 {
        let bucket_base = (n + fs - 6 * k) as usize;

        let m;
        let names;
        {
            let (sa_w, buckets) = sa.split_at_mut(bucket_base);
            m = classify::count_and_gather_lms_ints_4k(text, sa_w, n, k, buckets);
            names = if m > 1 {
                sa_w[..(n - m) as usize].fill(0);

                let first_lms = sa_w[(n - m) as usize];
                let left_count = buckets::init_for_lms_radix_ints_6k(text, k, buckets, first_lms);

                radix::radix_sort_lms_ints_2k(text, sa_w, n, m, &mut buckets[4 * k as usize..]);
                radix::radix_sort_set_markers(sa_w, k, &buckets[4 * k as usize..], i32::MIN);

                buckets::init_for_partial_ints_6k(text, k, buckets, first_lms, left_count);
                partial::induce_partial_order_ints_6k(
                    text, sa_w, n, k, buckets, first_lms, left_count,
                );

                rename::renumber_and_mark_distinct_lms_ints_4k(sa_w, n, m)
            } else {
                0
            };
        }

        if m > 1 {
            if names < m {
                let f = compact::compact_lms_ints(text, sa, n, m, fs);
                recurse(sa, n, m, names, fs, f)?;
                compact::reconstruct_compacted_lms_ints_2k(text, sa, n, k, m, fs, f, bucket_base);
            } else {
                let (_, buckets) = sa.split_at_mut(bucket_base);
                classify::count_lms_ints_2k(text, n, k, buckets);
            }

            let (sa_w, buckets) = sa.split_at_mut(bucket_base);
            buckets::init_start_end_ints_4k(k, buckets);
            finalize::place_lms_histogram_ints_4k(sa_w, n, k, m, buckets);
            finalize::induce_final_order_ints_4k(text, sa_w, n, k, buckets);
        } else {
            sa[0] = sa[(n - 1) as usize];

            let (sa_w, buckets) = sa.split_at_mut(bucket_base);
            buckets::init_start_end_ints_6k(k, buckets);
            finalize::place_lms_histogram_ints_6k(sa_w, n, k, m, buckets);
            finalize::induce_final_order_ints_6k(text, sa_w, n, k, buckets);
        }

        Ok(())
    } else if k > 0 && fs / k >= 4 {
        let bucket_base = (n + fs - 4 * k) as usize;

        let m;
        let names;
        {
            let (sa_w, buckets) = sa.split_at_mut(bucket_base);
            m = classify::count_and_gather_lms_ints_2k(text, sa_w, n, k, buckets);
            names = if m > 1 {
                let first_lms = sa_w[(n - m) as usize];
                buckets::init_for_radix_and_partial_ints_4k(text, k, buckets, first_lms);

                radix::radix_sort_lms_ints_2k(text, sa_w, n, m, &mut buckets[1..]);
                radix::radix_sort_set_markers(sa_w, k, &buckets[1..], SUFFIX_GROUP_MARKER);

                finalize::place_lms_interval_ints_4k(sa_w, n, k, m - 1, buckets);
                partial::induce_partial_order_ints_4k(text, sa_w, n, k, buckets);

                rename::renumber_and_mark_distinct_lms_ints_4k(sa_w, n, m)
            } else {
                0
            };
        }

        if m > 1 {
            if names < m {
                let f = compact::compact_lms_ints(text, sa, n, m, fs);
                recurse(sa, n, m, names, fs, f)?;
                compact::reconstruct_compacted_lms_ints_2k(text, sa, n, k, m, fs, f, bucket_base);
            } else {
                let (_, buckets) = sa.split_at_mut(bucket_base);
                classify::count_lms_ints_2k(text, n, k, buckets);
            }
        } else {
            sa[0] = sa[(n - 1) as usize];
        }

        let (sa_w, buckets) = sa.split_at_mut(bucket_base);
        buckets::init_start_end_ints_4k(k, buckets);
        finalize::place_lms_histogram_ints_4k(sa_w, n, k, m, buckets);
        finalize::induce_final_order_ints_4k(text, sa_w, n, k, buckets);

        Ok(())
    } else if k > 0 && fs / k >= 2 {
        let bucket_base = (n + fs - 2 * k) as usize;

        let m;
        let names;
        {
            let (sa_w, buckets) = sa.split_at_mut(bucket_base);
            m = classify::count_and_gather_lms_ints_2k(text, sa_w, n, k, buckets);
            names = if m > 1 {
                let first_lms = sa_w[(n - m) as usize];
                buckets::init_for_lms_radix_ints_2k(text, k, buckets, first_lms);

                radix::radix_sort_lms_ints_2k(text, sa_w, n, m, &mut buckets[1..]);
                finalize::place_lms_interval_ints_2k(sa_w, n, k, m - 1, buckets);

                buckets::init_start_end_ints_2k(k, buckets);
                partial::induce_partial_order_ints_2k(text, sa_w, n, k, buckets);

                rename::renumber_and_mark_distinct_lms_ints_1k(text, sa_w, n, m)
            } else {
                0
            };
        }

        if m > 1 {
            if names < m {
                let f = compact::compact_lms_ints(text, sa, n, m, fs);
                recurse(sa, n, m, names, fs, f)?;
                compact::reconstruct_compacted_lms_ints_2k(text, sa, n, k, m, fs, f, bucket_base);
            } else {
                let (_, buckets) = sa.split_at_mut(bucket_base);
                classify::count_lms_ints_2k(text, n, k, buckets);
            }
        } else {
            sa[0] = sa[(n - 1) as usize];
        }

        let (sa_w, buckets) = sa.split_at_mut(bucket_base);
        buckets::init_end_ints_2k(k, buckets);
        finalize::place_lms_histogram_ints_2k(sa_w, n, k, m, buckets);

        buckets::init_start_end_ints_2k(k, buckets);
        finalize::induce_final_order_ints_2k(text, sa_w, n, k, buckets);

        Ok(())
    } else {
        let base = (n + fs - k) as usize;
        let mut fallback = if fs < k {
            Some(alloc_buckets(k as usize)?)
        } else {
            None
        };

        sa[..n as usize].fill(0);

        let m = with_buckets_1k(sa, &mut fallback, base, |sa_w, bkts| {
            classify::count_ints(text, n, k, bkts);
            buckets::init_end_ints_1k(k, bkts);
            radix::radix_sort_lms_ints_1k(text, sa_w, n, bkts)
        });

        if m > 1 {
            with_buckets_1k(sa, &mut fallback, base, |sa_w, bkts| {
                partial::induce_partial_order_ints_1k(text, sa_w, n, k, bkts);
            });

            let names = rename::renumber_and_mark_distinct_lms_ints_1k(text, sa, n, m);
            if names < m {
                // Give the recursion every slot we can, including the
                // fallback buffer's memory.
                drop(fallback.take());

                let f = compact::compact_lms_ints(text, sa, n, m, fs);
                recurse(sa, n, m, names, fs, f)?;
                compact::reconstruct_compacted_lms_ints_1k(text, sa, n, m, fs, f);

                if fs < k {
                    fallback = Some(alloc_buckets(k as usize)?);
                }
            }

            with_buckets_1k(sa, &mut fallback, base, |sa_w, bkts| {
                classify::count_ints(text, n, k, bkts);
                buckets::init_end_ints_1k(k, bkts);
                finalize::place_lms_interval_ints_1k(text, sa_w, m, k, bkts);
            });
        }

        with_buckets_1k(sa, &mut fallback, base, |sa_w, bkts| {
            finalize::induce_final_order_ints_1k(text, sa_w, n, k, bkts);
        });

        Ok(())
    }
}

/// Solves the reduced problem packed at the workspace tail in place.
fn recurse(
    sa: &mut [i32],
    n: i32,
    m: i32,
    names: i32,
    fs: i32,
    f: i32,
) -> Result<(), ConstructionError> {
    let (sa_rec, rest) = sa.split_at_mut((n + fs - m + f) as usize);
    let text_rec = &mut rest[..(m - f) as usize];

    solve_ints(
        text_rec,
        &mut sa_rec[..(n + fs - m) as usize],
        m - f,
        names - f,
        fs + n - 2 * m + f,
    )
}
