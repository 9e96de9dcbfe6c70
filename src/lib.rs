//! This file is the root of the `kolom_engine` Rust crate.
//!
//! kolom is a small columnar data engine with two tightly coupled
//! subsystems:
//!
//! 1. An order-preserving [`Dictionary`] codec that maps a finite value
//!    universe (integers or strings) to minimal fixed-width big-endian
//!    ordinal codes, such that byte-wise comparison of codes matches the
//!    original value ordering.
//! 2. A chunked columnar [`Table`] that packs fixed-width columns into
//!    contiguous per-row buffers and computes binned histograms over one
//!    column by scanning all chunks in parallel, directly on the packed
//!    bytes.
//!
//! # Example
//!
//! ```
//! use kolom_engine::{Column, IntDictionary, Table};
//!
//! // Dictionary-encode a value stream into one-byte ordinal codes.
//! let dict = IntDictionary::new([300i64, -5, 300, 42]);
//! assert_eq!(dict.code_width(), 1);
//!
//! let codes: Vec<u8> = [300i64, -5, 300, 42]
//!     .iter()
//!     .map(|v| dict.encode(v).unwrap()[0])
//!     .collect();
//!
//! // Store the codes as a column and histogram over ordinal space.
//! let table = Table::new(vec![Column::new(1, 1, codes).unwrap()]).unwrap();
//! let counts = table.histogram(1, &[0, 1, 2, 3]).unwrap();
//! assert_eq!(counts, vec![1, 1, 2]);
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod dictionary;
pub mod kernels;
pub mod table;

mod error;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use config::EngineConfig;
pub use dictionary::{DictValue, Dictionary, IntDictionary, StringDictionary};
pub use error::KolomError;
pub use table::{ByteView, Column, Table};
