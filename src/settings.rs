use serde::{Deserialize, Serialize};

use crate::index::Coefficient;

/// Numerical conventions of the trace.
///
/// The defaults describe four-dimensional spacetime with four-component spinors. Setting
/// `dimension` to another integer gives the `D`-dimensional contraction rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSettings<C = i64> {
    /// `Tr(γ^a γ^b) = identity_trace · g^{a,b}`.
    pub identity_trace: C,
    /// `g^{a,b} g_{a,b} = dimension`.
    pub dimension: C,
}

impl<C: Coefficient> Default for TraceSettings<C> {
    fn default() -> Self {
        TraceSettings {
            identity_trace: C::from_count(4),
            dimension: C::from_count(4),
        }
    }
}

impl<C: Coefficient> TraceSettings<C> {
    pub fn with_dimension(mut self, dimension: C) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_identity_trace(mut self, identity_trace: C) -> Self {
        self.identity_trace = identity_trace;
        self
    }
}
