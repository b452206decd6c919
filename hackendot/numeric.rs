//! Numeric types used by the solvers

pub mod nimber;
