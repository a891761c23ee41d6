//! Shape-driven dispatch, one function per grammar production.
//!
//! Each function receives the opaque match for its production, classifies it
//! with ordered exact-set shape tests, and builds zero or more elements. The
//! first matching shape wins; exhausting the tests is a fatal
//! [`Error::UnhandledMatch`](crate::Error).

pub(crate) mod decls;
pub(crate) mod exprs;
pub(crate) mod names;
pub(crate) mod numbers;
pub(crate) mod operators;
pub(crate) mod stmts;
pub(crate) mod strings;
pub(crate) mod variables;
