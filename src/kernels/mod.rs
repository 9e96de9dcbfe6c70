//! Pure, stateless byte-level kernels shared by the dictionary codec and the
//! histogram engine.

pub mod ordinal;
