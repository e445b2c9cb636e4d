//! End-to-end LaTeX conversion tests
//!
//! Whole documents go through `mdtex::convert`; assertions check the
//! emitted LaTeX text.

mod export;
mod props;
mod structure;
mod tables;
