// Copyright 2025 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Linear-time suffix array and Burrows-Wheeler transform construction.
//!
//! This crate builds suffix arrays and BWTs of byte strings by induced
//! sorting (the SA-IS algorithm family), running in *O*(*n*) time with a
//! fixed 8 KiB bucket table as the only mandatory heap allocation; all
//! remaining scratch comes from the caller's index buffer, and handing
//! the engine a buffer larger than the text speeds up the recursive
//! sorting steps.
//!
//! # Examples
//!
//! Computing a suffix array:
//!
//! ```
//! let text = b"mississippi";
//! let mut sa = [0i32; 11];
//! saisort::suffix_array(text, &mut sa)?;
//!
//! assert_eq!(sa, [10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
//! # Ok::<(), saisort::ConstructionError>(())
//! ```
//!
//! Computing a Burrows-Wheeler transform and its primary index:
//!
//! ```
//! let text = b"mississippi";
//! let mut out = [0u8; 11];
//! let mut work = [0i32; 11];
//! let primary = saisort::bwt(text, &mut out, &mut work)?;
//!
//! assert_eq!(&out, b"ipssmpissii");
//! assert_eq!(primary, 5);
//! # Ok::<(), saisort::ConstructionError>(())
//! ```
//!
//! Searching with the [`SuffixArray`] wrapper:
//!
//! ```
//! use saisort::SuffixArray;
//!
//! let sa = SuffixArray::new(b"the quick brown fox")?;
//!
//! assert!(sa.contains(b"quick"));
//! assert!(!sa.contains(b"slow"));
//! # Ok::<(), saisort::ConstructionError>(())
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

// This crate casts i32s to usizes for the purpose of indexing. Because of these casts, any target
// where the size of a usize is less than the size of an i32 will produce unexpected (albeit not
// undefined) behavior. To prevent this, cause a compiler error on such targets.
#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("Target pointer width must be at least 32 bits");

mod buckets;
mod classify;
mod compact;
mod finalize;
mod partial;
mod radix;
mod rename;
mod sais;
mod suffix_array;

pub use sais::{bwt, bwt_in_place, suffix_array, ConstructionError};
pub use suffix_array::SuffixArray;
