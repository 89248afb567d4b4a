//! # Operator Framework
//!
//! Membership-degree operators and the context that selects which ones the
//! relation algebra uses.
//!
//! | Item | Role |
//! |------|------|
//! | [`UnaryOp`] / [`BinaryOp`] | the call contract every operator satisfies |
//! | [`TNorm`], [`TConorm`], [`Negation`], [`Modifier`] | built-in implementations |
//! | [`OperatorRegistry`] | named lookup, open to user-defined operators |
//! | [`Logic`] / [`SharedLogic`] | the active AND / OR / NOT |
//! | [`LogicConfig`] | selection by name, loadable from JSON |

pub mod ops;
pub mod registry;
pub mod context;
pub mod config;

pub use ops::{
    BinaryOp, BinaryRef, FnBinary, FnUnary, Modifier, Negation, TConorm, TNorm, UnaryOp,
    UnaryRef, binary_fn, unary_fn,
};
pub use registry::{Family, OperatorRegistry};
pub use context::{Logic, LogicScope, SharedLogic};
pub use config::LogicConfig;
