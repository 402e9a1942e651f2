//! core — families, parameters, constraints, options, and validation for
//! volatility innovation distributions.
//!
//! Purpose
//! -------
//! Collect the building blocks that do not depend on a particular density
//! formula: the family tag and its contract dispatch ([`Innovation`]),
//! validated shape parameters ([`ShapeParams`]), bound / constraint types
//! ([`ParamBound`], [`LinearConstraints`]), configuration ([`BoundsConfig`],
//! [`DistOptions`]), moment-based starting values, and domain checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every [`ShapeParams`] value was produced by
//!   [`Innovation::validate_params`] and lies inside its family domain.
//! - A [`BoundsConfig`] lies strictly inside the family domains, so any
//!   point an optimizer picks inside the bounds is accepted by `simulate`.
//!
//! Conventions
//! -----------
//! - This module performs no I/O. Validation failures are reported as
//!   [`DistResult`](crate::volatility::errors::DistResult); panics are
//!   reserved for length mismatches at the log-likelihood call site.
pub mod constraints;
pub mod family;
pub mod moments;
pub mod options;
pub mod params;
pub mod validation;

pub use self::constraints::{LinearConstraints, ParamBound};
pub use self::family::Innovation;
pub use self::options::{BoundsConfig, DistOptions};
pub use self::params::ShapeParams;
