// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Counting-sort placement of gathered LMS positions.

use crate::sais::{bkt2, ALPHABET_SIZE};

/// Distributes the LMS positions held in `sa[n - m..n]` through the
/// cursors prepared in the scratch row of the byte bucket table. The
/// first (smallest) LMS position stays behind; it is seeded into the
/// scans separately.
pub(crate) fn radix_sort_lms_bytes(
    text: &[u8],
    sa: &mut [i32],
    n: i32,
    m: i32,
    buckets: &mut [i32],
) {
    let mut i = n - 1;
    while i > n - m {
        let p = sa[i as usize];
        let b = 4 * ALPHABET_SIZE + bkt2(i32::from(text[p as usize]), false);
        buckets[b] -= 1;
        sa[buckets[b] as usize] = p;
        i -= 1;
    }
}

/// Integer form of [`radix_sort_lms_bytes`] over caller-selected cursors
/// (the scratch row in the 6k layout, the odd 2k slots in the 4k/2k
/// layouts).
pub(crate) fn radix_sort_lms_ints_2k(
    text: &[i32],
    sa: &mut [i32],
    n: i32,
    m: i32,
    induction_bucket: &mut [i32],
) {
    let mut i = n - 1;
    while i > n - m {
        let p = sa[i as usize];
        let b = bkt2(text[p as usize], false);
        induction_bucket[b] -= 1;
        sa[induction_bucket[b] as usize] = p;
        i -= 1;
    }
}

/// 1k layout: classification and placement fused into one right-to-left
/// pass (there is no spare row to hold a gathered LMS list). Returns the
/// LMS count. The last slot filled is cleared again when more than one
/// LMS exists; the smallest LMS position is re-seeded by the scans.
pub(crate) fn radix_sort_lms_ints_1k(text: &[i32], sa: &mut [i32], n: i32, buckets: &mut [i32]) -> i32 {
    let mut m = 0;
    let mut s: u32 = 1;
    let mut c0 = text[(n - 1) as usize];
    let mut c1;
    let mut c2 = 0;

    let mut i = n - 2;
    while i >= 0 {
        c1 = c0;
        c0 = text[i as usize];
        s = (s << 1) + u32::from(c0 > c1 - (s & 1) as i32);
        if (s & 3) == 1 {
            c2 = c1;
            buckets[c2 as usize] -= 1;
            sa[buckets[c2 as usize] as usize] = i + 1;
            m += 1;
        }
        i -= 1;
    }

    if m > 1 {
        sa[buckets[c2 as usize] as usize] = 0;
    }

    m
}

/// Tags the first entry of every symbol's placed LMS block with `marker`
/// (the sign bit in the 6k layout, bit 30 in the 4k layout). Empty blocks
/// share a boundary slot with their neighbor, making the `|=` idempotent.
pub(crate) fn radix_sort_set_markers(
    sa: &mut [i32],
    k: i32,
    induction_bucket: &[i32],
    marker: i32,
) {
    for c in 0..(k - 1) as usize {
        sa[induction_bucket[bkt2(c as i32, false)] as usize] |= marker;
    }
}
