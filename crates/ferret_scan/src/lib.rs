//! Ferret-Scan CLI wiring (spec §3.11): the flag contract plus the `run()`
//! driver that chains every in-scope crate together. Flag parsing,
//! configuration-file loading, redaction, and the declared-only output
//! formats are out of scope (spec §1, §6) — this crate exists to prove the
//! in-scope contract is satisfiable end to end, not to be the shipped
//! front-end.

pub mod cli;
mod discover;
mod preprocess;
pub mod run;
mod validators;

pub use cli::Args;
pub use run::run;
