//! Testing utilities for code built on ironfold.
//!
//! - [`assert_collections_equal`]: exact order-dependent comparison
//! - [`assert_modes_agree`]: run a combiner sequentially and in several
//!   parallel layouts and check they all agree
//! - [`assert_try_modes_agree`]: the same for fallible combiners, errors
//!   included
//!
//! ```
//! use ironfold::combiners::PartitionBy;
//! use ironfold::testing::*;
//!
//! let input: Vec<u32> = (20..=40).collect();
//! let parts = assert_modes_agree(&input, &PartitionBy::new(|n: &u32| n % 2 == 0));
//! assert_collections_equal(parts.get(false), &[21, 23, 25, 27, 29, 31, 33, 35, 37, 39]);
//! ```

pub mod assertions;

pub use assertions::*;
