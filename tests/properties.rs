// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference construction: sort suffix indices by suffix bytes. Slice
/// comparison puts a proper prefix before its extensions, which is the
/// virtual-sentinel order.
fn naive_suffix_array(text: &[u8]) -> Vec<i32> {
    let mut sa: Vec<i32> = (0..text.len() as i32).collect();
    sa.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    sa
}

/// Reference BWT from a suffix array: the last-column byte of every
/// sorted rotation, with the sentinel row folded into a prepended
/// `text[n - 1]` and the primary index.
fn naive_bwt(text: &[u8]) -> (Vec<u8>, usize) {
    let n = text.len();
    let sa = naive_suffix_array(text);

    let mut out = vec![text[n - 1]];
    let mut primary = 0;
    for (i, &p) in sa.iter().enumerate() {
        if p == 0 {
            primary = i + 1;
        } else {
            out.push(text[(p - 1) as usize]);
        }
    }

    (out, primary)
}

/// Inverts a transform produced by `saisort::bwt` via LF-mapping over the
/// sentinel-extended last column, reconstructing the text back to front.
fn unbwt(bwt: &[u8], primary: usize) -> Vec<u8> {
    let n = bwt.len();
    if n == 0 {
        return Vec::new();
    }

    // Reinsert the sentinel row (symbol -1) at the primary index.
    let mut last: Vec<i32> = Vec::with_capacity(n + 1);
    last.extend(bwt[..primary].iter().map(|&b| i32::from(b)));
    last.insert(primary, -1);
    last.extend(bwt[primary..].iter().map(|&b| i32::from(b)));

    // counts[c + 1] = occurrences of symbol c (sentinel at slot 0).
    let mut counts = vec![0usize; 258];
    for &c in &last {
        counts[(c + 1) as usize + 1] += 1;
    }
    for c in 1..258 {
        counts[c] += counts[c - 1];
    }

    let mut lf = vec![0usize; n + 1];
    let mut seen = vec![0usize; 257];
    for (i, &c) in last.iter().enumerate() {
        let c = (c + 1) as usize;
        lf[i] = counts[c] + seen[c];
        seen[c] += 1;
    }

    // Row 0 is the rotation starting at the sentinel; its last column
    // holds the final text byte, and LF steps one position left.
    let mut text = vec![0u8; n];
    let mut row = 0;
    for t in 1..=n {
        text[n - t] = last[row] as u8;
        row = lf[row];
    }

    text
}

fn check_suffix_array(text: &[u8]) {
    let mut sa = vec![0i32; text.len()];
    saisort::suffix_array(text, &mut sa).unwrap();
    assert_eq!(sa, naive_suffix_array(text), "text: {text:?}");
}

fn check_bwt(text: &[u8]) {
    let n = text.len();
    let mut out = vec![0u8; n];
    let mut work = vec![0i32; n];
    let primary = saisort::bwt(text, &mut out, &mut work).unwrap();

    let (expected, expected_primary) = naive_bwt(text);
    assert_eq!(out, expected, "text: {text:?}");
    assert_eq!(primary, expected_primary, "text: {text:?}");

    assert_eq!(unbwt(&out, primary), text, "round trip, text: {text:?}");
}

#[test]
fn banana() {
    let mut sa = [0i32; 6];
    saisort::suffix_array(b"banana", &mut sa).unwrap();
    assert_eq!(sa, [5, 3, 1, 0, 4, 2]);

    let mut out = [0u8; 6];
    let mut work = [0i32; 6];
    let primary = saisort::bwt(b"banana", &mut out, &mut work).unwrap();
    assert_eq!(&out, b"annbaa");
    assert_eq!(primary, 4);
}

#[test]
fn mississippi() {
    let mut sa = [0i32; 11];
    saisort::suffix_array(b"mississippi", &mut sa).unwrap();
    assert_eq!(sa, [10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);

    let mut out = [0u8; 11];
    let mut work = [0i32; 11];
    let primary = saisort::bwt(b"mississippi", &mut out, &mut work).unwrap();
    assert_eq!(&out, b"ipssmpissii");
    assert_eq!(primary, 5);
    check_bwt(b"mississippi");
}

#[test]
fn abracadabra() {
    let mut sa = [0i32; 11];
    saisort::suffix_array(b"abracadabra", &mut sa).unwrap();
    assert_eq!(sa, [10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);

    let mut out = [0u8; 11];
    let mut work = [0i32; 11];
    let primary = saisort::bwt(b"abracadabra", &mut out, &mut work).unwrap();
    assert_eq!(&out, b"ardrcaaaabb");
    assert_eq!(primary, 3);
    check_bwt(b"abracadabra");
}

#[test]
fn repeated_symbol() {
    let mut sa = [0i32; 4];
    saisort::suffix_array(b"aaaa", &mut sa).unwrap();
    assert_eq!(sa, [3, 2, 1, 0]);

    let mut out = [0u8; 4];
    let mut work = [0i32; 4];
    let primary = saisort::bwt(b"aaaa", &mut out, &mut work).unwrap();
    assert_eq!(&out, b"aaaa");
    assert_eq!(primary, 4);

    let text = vec![0x7f; 1000];
    let mut sa = vec![0i32; 1000];
    saisort::suffix_array(&text, &mut sa).unwrap();
    let descending: Vec<i32> = (0..1000).rev().collect();
    assert_eq!(sa, descending);

    let mut out = vec![0u8; 1000];
    let mut work = vec![0i32; 1000];
    let primary = saisort::bwt(&text, &mut out, &mut work).unwrap();
    assert_eq!(out, text);
    assert_eq!(primary, 1000);
}

#[test]
fn periodic() {
    let mut sa = [0i32; 9];
    saisort::suffix_array(b"abcabcabc", &mut sa).unwrap();
    assert_eq!(sa, [6, 3, 0, 7, 4, 1, 8, 5, 2]);

    let mut out = [0u8; 9];
    let mut work = [0i32; 9];
    let primary = saisort::bwt(b"abcabcabc", &mut out, &mut work).unwrap();
    assert_eq!(out[0], b'c');
    assert!(primary >= 1 && primary <= 9);
    check_bwt(b"abcabcabc");

    check_suffix_array(&b"ab".repeat(500));
    check_bwt(&b"ab".repeat(500));
    check_suffix_array(&b"abb".repeat(333));
    check_bwt(&b"abb".repeat(333));
}

#[test]
fn tiny_inputs() {
    let mut sa = [0i32; 0];
    saisort::suffix_array(b"", &mut sa).unwrap();

    let mut out = [0u8; 0];
    let mut work = [0i32; 0];
    assert_eq!(saisort::bwt(b"", &mut out, &mut work).unwrap(), 0);

    let mut sa = [7i32; 1];
    saisort::suffix_array(&[0x42], &mut sa).unwrap();
    assert_eq!(sa, [0]);

    let mut out = [0u8; 1];
    let mut work = [0i32; 1];
    assert_eq!(saisort::bwt(&[0x42], &mut out, &mut work).unwrap(), 1);
    assert_eq!(out, [0x42]);

    // n = 2 with equal symbols
    let mut sa = [0i32; 2];
    saisort::suffix_array(b"aa", &mut sa).unwrap();
    assert_eq!(sa, [1, 0]);

    let mut out = [0u8; 2];
    let mut work = [0i32; 2];
    let primary = saisort::bwt(b"aa", &mut out, &mut work).unwrap();
    assert_eq!(&out, b"aa");
    assert_eq!(primary, 2);

    for text in [&b"ab"[..], b"ba", b"aab", b"aba", b"baa", b"bab", b"cba"] {
        check_suffix_array(text);
        check_bwt(text);
    }
}

#[test]
fn fibonacci_words() {
    // Highly repetitive; forces deep recursion levels.
    let mut a = b"a".to_vec();
    let mut b = b"ab".to_vec();
    while b.len() < 4096 {
        let next = [b.as_slice(), a.as_slice()].concat();
        a = b;
        b = next;
    }

    check_suffix_array(&b);
    check_bwt(&b);
}

#[test]
fn random_oracle() {
    let mut rng = StdRng::seed_from_u64(0x5a15);

    for &k in &[1usize, 2, 4, 26, 256] {
        for &n in &[k, 2 * k, k * k, 3, 17, 100, 1000, 2048] {
            let n = n.clamp(2, 2048);
            let text: Vec<u8> = (0..n).map(|_| rng.gen_range(0..k) as u8).collect();

            check_suffix_array(&text);
            check_bwt(&text);
        }
    }
}

#[test]
fn deep_recursion_oracle() {
    let mut rng = StdRng::seed_from_u64(0xf1b0);

    // Small alphabets at full oracle size keep the name count low, so
    // every level of the recursion actually runs.
    for &k in &[2usize, 3] {
        let text: Vec<u8> = (0..4096).map(|_| rng.gen_range(0..k) as u8).collect();

        check_suffix_array(&text);
        check_bwt(&text);
    }
}

#[test]
fn slack_independence() {
    let mut rng = StdRng::seed_from_u64(0x51ac);
    let text: Vec<u8> = (0..1500).map(|_| rng.gen_range(0..7) as u8).collect();

    let mut reference = vec![0i32; text.len()];
    saisort::suffix_array(&text, &mut reference).unwrap();

    for extra in [1usize, 5, 100, 6 * 256, 10000] {
        let mut sa = vec![0i32; text.len() + extra];
        saisort::suffix_array(&text, &mut sa).unwrap();
        assert_eq!(&sa[..text.len()], &reference[..], "extra: {extra}");
    }

    let mut out_reference = vec![0u8; text.len()];
    let mut work = vec![0i32; text.len()];
    let primary_reference = saisort::bwt(&text, &mut out_reference, &mut work).unwrap();

    for extra in [1usize, 100, 10000] {
        let mut out = vec![0u8; text.len()];
        let mut work = vec![0i32; text.len() + extra];
        let primary = saisort::bwt(&text, &mut out, &mut work).unwrap();
        assert_eq!(out, out_reference, "extra: {extra}");
        assert_eq!(primary, primary_reference, "extra: {extra}");
    }
}

#[test]
fn in_place_transform_matches_copying() {
    let mut rng = StdRng::seed_from_u64(0xa11a);

    for &n in &[2usize, 3, 64, 1024] {
        let text: Vec<u8> = (0..n).map(|_| rng.gen_range(0..5) as u8).collect();

        let mut out = vec![0u8; n];
        let mut work = vec![0i32; n];
        let primary = saisort::bwt(&text, &mut out, &mut work).unwrap();

        let mut data = text.clone();
        let mut work = vec![0i32; n];
        let primary_in_place = saisort::bwt_in_place(&mut data, &mut work).unwrap();

        assert_eq!(data, out);
        assert_eq!(primary_in_place, primary);
    }
}

#[test]
fn deterministic() {
    let mut rng = StdRng::seed_from_u64(0xdede);
    let text: Vec<u8> = (0..3000).map(|_| rng.gen()).collect();

    let mut first = vec![0i32; text.len()];
    saisort::suffix_array(&text, &mut first).unwrap();
    let mut second = vec![0i32; text.len()];
    saisort::suffix_array(&text, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn permutation_and_order() {
    let mut rng = StdRng::seed_from_u64(0x0bde);
    let text: Vec<u8> = (0..4096).map(|_| rng.gen_range(0..16) as u8).collect();

    let mut sa = vec![0i32; text.len()];
    saisort::suffix_array(&text, &mut sa).unwrap();

    let mut seen = vec![false; text.len()];
    for &p in &sa {
        assert!(!seen[p as usize]);
        seen[p as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));

    for w in sa.windows(2) {
        assert!(text[w[0] as usize..] < text[w[1] as usize..]);
    }
}

#[test]
fn rejects_bad_arguments() {
    let mut sa = [0i32; 3];
    assert!(matches!(
        saisort::suffix_array(b"abcd", &mut sa),
        Err(saisort::ConstructionError::WorkspaceTooSmall {
            needed: 4,
            available: 3
        })
    ));

    let mut out = [0u8; 1];
    let mut work = [0i32; 4];
    assert!(saisort::bwt(b"abcd", &mut out, &mut work).is_err());
}
