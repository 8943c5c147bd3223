//! `watchtower-contracts` — the validation gate placed at every module boundary.
//!
//! A [`Validator`] pairs a declared [`Schema`] with a label. Every value that
//! leaves (or enters) a module's public API passes through one, together with
//! the [`Contract`] metadata describing the call site. Validation never
//! transforms data: it either hands the value back untouched or fails with a
//! [`ContractViolation`] that names the offending field(s).

pub mod contract;
mod finite;
pub mod schema;
pub mod validator;

pub use contract::{Contract, Direction};
pub use schema::{Field, Schema};
pub use validator::{ContractViolation, Validator, Violation};
