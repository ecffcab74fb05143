//! Hull core configuration (§5: "implementations must document and hold
//! fixed their LP pivot rule so results are reproducible").
//!
//! There is no floating-point epsilon to carry here — the arithmetic is
//! exact — so `HullConfig` is much smaller than the teacher's `GeomCfg`.

/// Pivot rule used by the simplex engine (`crate::simplex`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotRule {
    /// Bland's smallest-index rule. Guarantees termination on every input;
    /// the default, and the rule assumed by every testable property in
    /// §8 (they are stated about the *result*, which is independent of
    /// pivot rule, but Bland is what we fix per §5/§9's open question).
    Bland,
    /// Classic most-negative-reduced-cost rule. Usually far fewer pivots
    /// in practice; offered for benchmarking (`benches/wrap_bench.rs`,
    /// `benches/reduce_bench.rs`). Not guaranteed to terminate on
    /// degenerate inputs without an anti-cycling fallback, so the engine
    /// silently falls back to Bland after a bounded number of pivots on
    /// the same basis.
    Dantzig,
}

impl Default for PivotRule {
    fn default() -> Self {
        PivotRule::Bland
    }
}

/// Ambient configuration threaded through the hull core.
#[derive(Clone, Copy, Debug, Default)]
pub struct HullConfig {
    pub pivot_rule: PivotRule,
}

impl HullConfig {
    pub fn new(pivot_rule: PivotRule) -> Self {
        Self { pivot_rule }
    }
}
