/// The result of a successful solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Optimal value for each variable, in variable order
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective: f64,
    /// Pivots performed before reaching the optimum
    pub iterations: usize,
}
