//! Fuzzy operators over membership degrees.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// A unary operator `[0,1] → [0,1]` (negations, linguistic modifiers).
pub trait UnaryOp: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn call(&self, x: f64) -> f64;
}

/// A binary operator `[0,1]×[0,1] → [0,1]` (t-norms, t-conorms, aggregators).
///
/// Projection and collapse assume the operator is commutative and
/// associative; nothing checks it.
pub trait BinaryOp: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn call(&self, a: f64, b: f64) -> f64;
}

pub type UnaryRef = Arc<dyn UnaryOp>;
pub type BinaryRef = Arc<dyn BinaryOp>;

// ============================================================================
// Built-in t-norms (AND)
// ============================================================================

/// Triangular norms used as fuzzy AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TNorm {
    Min,
    Product,
    Lukasiewicz,
    Drastic,
}

impl TNorm {
    pub const ALL: [TNorm; 4] = [TNorm::Min, TNorm::Product, TNorm::Lukasiewicz, TNorm::Drastic];
}

impl BinaryOp for TNorm {
    fn name(&self) -> &str {
        match self {
            Self::Min => "MIN",
            Self::Product => "PRODUCT",
            Self::Lukasiewicz => "LUKASIEWICZ",
            Self::Drastic => "DRASTIC_PRODUCT",
        }
    }

    fn call(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Min => a.min(b),
            Self::Product => a * b,
            Self::Lukasiewicz => (a + b - 1.0).max(0.0),
            Self::Drastic => {
                if a == 1.0 {
                    b
                } else if b == 1.0 {
                    a
                } else {
                    0.0
                }
            }
        }
    }
}

// ============================================================================
// Built-in t-conorms (OR)
// ============================================================================

/// Triangular conorms used as fuzzy OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TConorm {
    Max,
    ProbabilisticSum,
    BoundedSum,
    Drastic,
}

impl TConorm {
    pub const ALL: [TConorm; 4] = [
        TConorm::Max,
        TConorm::ProbabilisticSum,
        TConorm::BoundedSum,
        TConorm::Drastic,
    ];
}

impl BinaryOp for TConorm {
    fn name(&self) -> &str {
        match self {
            Self::Max => "MAX",
            Self::ProbabilisticSum => "PROBABILISTIC_SUM",
            Self::BoundedSum => "BOUNDED_SUM",
            Self::Drastic => "DRASTIC_SUM",
        }
    }

    fn call(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Max => a.max(b),
            Self::ProbabilisticSum => a + b - a * b,
            Self::BoundedSum => (a + b).min(1.0),
            Self::Drastic => {
                if a == 0.0 {
                    b
                } else if b == 0.0 {
                    a
                } else {
                    1.0
                }
            }
        }
    }
}

// ============================================================================
// Built-in negations (NOT)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Negation {
    /// `1 - x`
    Standard,
    /// `(1 + cos(πx)) / 2`
    Cosine,
}

impl Negation {
    pub const ALL: [Negation; 2] = [Negation::Standard, Negation::Cosine];
}

impl UnaryOp for Negation {
    fn name(&self) -> &str {
        match self {
            Self::Standard => "STANDARD",
            Self::Cosine => "COSINE",
        }
    }

    fn call(&self, x: f64) -> f64 {
        match self {
            Self::Standard => 1.0 - x,
            Self::Cosine => (1.0 + (PI * x).cos()) / 2.0,
        }
    }
}

// ============================================================================
// Linguistic modifiers (hedges)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Concentration: `x²`
    Very,
    /// Dilation: `√x`
    MoreOrLess,
}

impl Modifier {
    pub const ALL: [Modifier; 2] = [Modifier::Very, Modifier::MoreOrLess];
}

impl UnaryOp for Modifier {
    fn name(&self) -> &str {
        match self {
            Self::Very => "VERY",
            Self::MoreOrLess => "MORE_OR_LESS",
        }
    }

    fn call(&self, x: f64) -> f64 {
        match self {
            Self::Very => x * x,
            Self::MoreOrLess => x.sqrt(),
        }
    }
}

// ============================================================================
// Closure-backed operators
// ============================================================================

/// A named unary operator backed by a closure.
pub struct FnUnary<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnUnary<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnUnary").field("name", &self.name).finish()
    }
}

impl<F> UnaryOp for FnUnary<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn name(&self) -> &str { &self.name }
    fn call(&self, x: f64) -> f64 { (self.f)(x) }
}

/// A named binary operator backed by a closure.
pub struct FnBinary<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnBinary<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBinary").field("name", &self.name).finish()
    }
}

impl<F> BinaryOp for FnBinary<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn name(&self) -> &str { &self.name }
    fn call(&self, a: f64, b: f64) -> f64 { (self.f)(a, b) }
}

/// Wrap a closure as a shareable unary operator.
pub fn unary_fn<F>(name: impl Into<String>, f: F) -> UnaryRef
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Arc::new(FnUnary { name: name.into(), f })
}

/// Wrap a closure as a shareable binary operator.
///
/// ```
/// use pruf_rs::logic::{binary_fn, BinaryOp};
///
/// // Hamacher product
/// let hamacher = binary_fn("HAMACHER", |a, b| {
///     if a == 0.0 && b == 0.0 { 0.0 } else { a * b / (a + b - a * b) }
/// });
/// assert_eq!(hamacher.call(1.0, 1.0), 1.0);
/// assert_eq!(hamacher.call(0.0, 0.0), 0.0);
/// ```
pub fn binary_fn<F>(name: impl Into<String>, f: F) -> BinaryRef
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    Arc::new(FnBinary { name: name.into(), f })
}
