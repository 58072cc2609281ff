// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! In-place compaction of the reduced problem and its undoing.
//!
//! When some LMS substrings share names, the reduced string must be
//! solved recursively. LMS suffixes whose name is unique already know
//! their final rank, so they are split off: their text positions get the
//! sign bit set in T, their ranks are parked at the far end of the
//! workspace, and the recursion runs on the remaining `m - f` names. The
//! merge afterwards reinstalls them and clears every T marker in one
//! sweep.

use crate::classify;

/// Splits the named LMS suffixes into determined (unique name) and open
/// ones. Renumbers the open names down by the count of determined
/// predecessors, marks determined text positions in T, packs the reduced
/// string into `sa[n + fs - (m - f)..n + fs]` and the determined ranks
/// into `sa[n + fs - m..n + fs - m + f]`. Returns `f`, the determined
/// count.
pub(crate) fn compact_lms_ints(text: &mut [i32], sa: &mut [i32], n: i32, m: i32, fs: i32) -> i32 {
    let mut f = 0;

    for i in 0..m as usize {
        let p = sa[i] as u32;
        let slot = (m + (p >> 1) as i32) as usize;
        let mut s = sa[slot];
        if s < 0 {
            text[p as usize] |= i32::MIN;
            f += 1;
            s = i as i32 + i32::MIN + f;
        }
        sa[slot] = s - f;
    }

    {
        let mut l = m - 1;
        let mut r = n + fs - 1;
        let mut i = m + (n >> 1) - 1;
        while i >= m {
            let p = sa[i as usize];
            sa[l as usize] = p & i32::MAX;
            l -= i32::from(p < 0);
            sa[r as usize] = p - 1;
            r -= i32::from(p > 0);
            i -= 1;
        }

        sa.copy_within((l + 1) as usize..(l + 1 + f) as usize, (n + fs - m) as usize);
    }

    f
}

/// Maps the ranks left in `sa[..m]` back to LMS text positions through
/// the gathered position table at `sa[n - m..n]`.
pub(crate) fn reconstruct_lms(sa: &mut [i32], n: i32, m: i32) {
    for i in 0..m as usize {
        sa[i] = sa[(n - m + sa[i]) as usize];
    }
}

/// Reinstalls the determined suffixes among the recursively solved ones.
/// One left-to-right sweep over T finds the marked positions (clearing
/// the markers, restoring T), writes each at its parked rank, and a
/// second sweep fills the remaining empty rank slots from the solved
/// position table. Marked positions are at least two apart, so the sweep
/// may skip a slot after each hit.
pub(crate) fn merge_compacted_lms(text: &mut [i32], sa: &mut [i32], n: i32, m: i32, f: i32) {
    let base = (n - m - 1) as usize;

    {
        let mut l = 0usize;
        let mut tmp = sa[base];
        let mut i = 0;
        while i < n {
            let c = text[i as usize];
            if c < 0 {
                text[i as usize] = c & i32::MAX;
                sa[tmp as usize] = i;
                i += 1;
                l += 1;
                tmp = sa[base + l];
            }
            i += 1;
        }
    }

    {
        let mut l = f as usize;
        let mut tmp = sa[base + l];
        for i in 0..m as usize {
            if sa[i] == 0 {
                sa[i] = tmp;
                l += 1;
                tmp = sa[base + l];
            }
        }
    }
}

/// Post-recursion reconstruction for the layouts that keep a 2k count
/// table: regathers the open LMS positions (markers make the determined
/// ones invisible), translates ranks to positions, then merges. The
/// count rows live inside the workspace tail at `bucket_base`, past
/// every slot this routine writes, but the parked ranks it reads first
/// may lie beyond them, so the split happens here.
pub(crate) fn reconstruct_compacted_lms_ints_2k(
    text: &mut [i32],
    sa: &mut [i32],
    n: i32,
    k: i32,
    m: i32,
    fs: i32,
    f: i32,
    bucket_base: usize,
) {
    if f > 0 {
        sa.copy_within(
            (n + fs - m) as usize..(n + fs - m + f) as usize,
            (n - m - 1) as usize,
        );

        let (sa_w, buckets) = sa.split_at_mut(bucket_base);
        classify::count_and_gather_compacted_lms_ints_2k(text, sa_w, n, k, buckets);
        reconstruct_lms(sa_w, n, m - f);

        sa_w.copy_within(..(m - f) as usize, (n - m - 1 + f) as usize);
        sa_w[..m as usize].fill(0);

        merge_compacted_lms(text, sa_w, n, m, f);
    } else {
        let (sa_w, buckets) = sa.split_at_mut(bucket_base);
        classify::count_and_gather_lms_ints_2k(text, sa_w, n, k, buckets);
        reconstruct_lms(sa_w, n, m);
    }
}

/// 1k form of [`reconstruct_compacted_lms_ints_2k`]: no count table to
/// refresh, plain gathers suffice.
pub(crate) fn reconstruct_compacted_lms_ints_1k(
    text: &mut [i32],
    sa: &mut [i32],
    n: i32,
    m: i32,
    fs: i32,
    f: i32,
) {
    if f > 0 {
        sa.copy_within(
            (n + fs - m) as usize..(n + fs - m + f) as usize,
            (n - m - 1) as usize,
        );

        classify::gather_compacted_lms_ints(text, sa, n);
        reconstruct_lms(sa, n, m - f);

        sa.copy_within(..(m - f) as usize, (n - m - 1 + f) as usize);
        sa[..m as usize].fill(0);

        merge_compacted_lms(text, sa, n, m, f);
    } else {
        classify::gather_lms_ints(text, sa, n);
        reconstruct_lms(sa, n, m);
    }
}
