use log::{debug, trace};
use thiserror::Error;

use crate::problem::LinearProgram;
use crate::solution::Solution;
use crate::tableau::Tableau;

/// Terminal failures of [`Solver::solve`].
///
/// `Unbounded` and `IterationLimitExceeded` are kept distinct so callers can
/// tell a divergent program from degenerate cycling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("no objective has been set")]
    NoObjective,
    #[error("program has no constraints")]
    NoConstraints,
    #[error("program is unbounded")]
    Unbounded,
    #[error("no optimum found within {0} iterations")]
    IterationLimitExceeded(usize),
}

/// Outcome of one round of pivot selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pivot {
    /// Pivot on this cell next.
    Entry { row: usize, col: usize },
    /// No column can improve the objective.
    Optimal,
    /// An improving column exists but no row bounds it.
    Unbounded,
}

/// Tableau simplex solver for [`LinearProgram`]s.
pub struct Solver {
    /// Pivots allowed before giving up; stands in for an anti-cycling rule
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Solve `program`, writing the optimal value of each variable back into
    /// its slot. On any error the slots are left untouched.
    pub fn solve(&self, program: &mut LinearProgram) -> Result<Solution, SolveError> {
        let objective = program
            .objective()
            .cloned()
            .ok_or(SolveError::NoObjective)?;
        let mut tableau = Tableau::from_problem(program)?;
        let iterations = self.iterate(&mut tableau)?;

        let values = tableau.variable_values(program.num_variables());
        let objective_value = objective.constant
            + objective
                .coefficients
                .iter()
                .zip(&values)
                .map(|(c, x)| c * x)
                .sum::<f64>();
        program.assign_values(&values);

        Ok(Solution {
            values,
            objective: objective_value,
            iterations,
        })
    }

    /// Run the pivot loop to termination, returning the pivot count.
    fn iterate(&self, tableau: &mut Tableau) -> Result<usize, SolveError> {
        for iteration in 0..self.max_iterations {
            match self.select_pivot(tableau) {
                Pivot::Optimal => return Ok(iteration),
                Pivot::Unbounded => return Err(SolveError::Unbounded),
                Pivot::Entry { row, col } => {
                    debug!("iteration {iteration}: pivot at ({row}, {col})");
                    trace!("\n{tableau}");
                    tableau.pivot(row, col);
                }
            }
        }
        // the cap may land exactly on the optimum
        match self.select_pivot(tableau) {
            Pivot::Optimal => Ok(self.max_iterations),
            _ => Err(SolveError::IterationLimitExceeded(self.max_iterations)),
        }
    }

    /// Dantzig's rule: enter the column with the most negative reduced cost,
    /// leave on the minimum nonnegative RHS/entry ratio over strictly
    /// positive entries. Ties break to the lowest index on both sides.
    pub(crate) fn select_pivot(&self, tableau: &Tableau) -> Pivot {
        let rhs = tableau.cols() - 1;

        let mut entering = None;
        let mut best_cost = -self.tolerance;
        for j in 0..rhs {
            let cost = tableau[(0, j)];
            if cost < best_cost {
                best_cost = cost;
                entering = Some(j);
            }
        }
        let Some(col) = entering else {
            return Pivot::Optimal;
        };

        let mut leaving = None;
        let mut best_ratio = f64::INFINITY;
        for i in 1..tableau.rows() {
            let entry = tableau[(i, col)];
            if entry <= self.tolerance {
                continue;
            }
            let ratio = tableau[(i, rhs)] / entry;
            if ratio >= 0.0 && ratio < best_ratio {
                best_ratio = ratio;
                leaving = Some(i);
            }
        }

        match leaving {
            Some(row) => Pivot::Entry { row, col },
            None => Pivot::Unbounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{LinearProgram, Sense, Variable};

    const TOLERANCE: f64 = 1e-6;

    /// Substitute `values` into every constraint of `program` and check it
    /// holds, along with nonnegativity of the values themselves.
    fn assert_feasible(program: &LinearProgram, values: &[f64]) {
        for &value in values {
            assert!(value >= -TOLERANCE, "negative value {value}");
        }
        for (i, constraint) in program.constraints().iter().enumerate() {
            let lhs: f64 = constraint
                .coefficients
                .iter()
                .zip(values)
                .map(|(c, x)| c * x)
                .sum();
            let holds = match constraint.sense {
                Sense::Le => lhs <= constraint.constant + TOLERANCE,
                Sense::Ge => lhs >= constraint.constant - TOLERANCE,
                Sense::Eq => (lhs - constraint.constant).abs() <= TOLERANCE,
            };
            assert!(
                holds,
                "constraint {i} violated: lhs = {lhs}, rhs = {}",
                constraint.constant
            );
        }
    }

    fn two_variable_mix() -> LinearProgram {
        // maximize 6x + 9y
        //   2x + 3y <= 12
        //    x +  y <= 5
        let mut program = LinearProgram::new(vec![Variable::new(); 2]);
        program.set_objective(vec![6.0, 9.0], 0.0).unwrap();
        program.add_constraint(vec![2.0, 3.0], Sense::Le, 12.0).unwrap();
        program.add_constraint(vec![1.0, 1.0], Sense::Le, 5.0).unwrap();
        program
    }

    fn three_variable_mix() -> LinearProgram {
        // maximize 40x1 + 60x2 + 50x3
        //   4x1 + 6x2 + 5x3 <= 240
        //   3x1 + 8x2 + 6x3 <= 200
        //   2x1 + 3x2 + 4x3 <= 120
        let mut program = LinearProgram::new(vec![Variable::new(); 3]);
        program.set_objective(vec![40.0, 60.0, 50.0], 0.0).unwrap();
        program
            .add_constraint(vec![4.0, 6.0, 5.0], Sense::Le, 240.0)
            .unwrap();
        program
            .add_constraint(vec![3.0, 8.0, 6.0], Sense::Le, 200.0)
            .unwrap();
        program
            .add_constraint(vec![2.0, 3.0, 4.0], Sense::Le, 120.0)
            .unwrap();
        program
    }

    #[test]
    fn test_two_variable_mix() {
        let mut program = two_variable_mix();
        let solution = Solver::new().solve(&mut program).unwrap();

        // this program has alternative optima, so only the objective value
        // is pinned down
        assert!(
            (solution.objective - 36.0).abs() < TOLERANCE,
            "Z = {} (expected 36)",
            solution.objective
        );
        assert_feasible(&program, &solution.values);
    }

    #[test]
    fn test_two_variable_mix_writes_back() {
        let mut program = two_variable_mix();
        let solution = Solver::new().solve(&mut program).unwrap();

        for (slot, &value) in program.variables().iter().zip(&solution.values) {
            assert_eq!(slot.value(), value);
        }
    }

    #[test]
    fn test_three_variable_mix() {
        let mut program = three_variable_mix();
        let solution = Solver::new().solve(&mut program).unwrap();

        // optimum verified by duality: prices (10, 0, 0) are dual feasible
        // with matching objective 2400
        assert!(
            (solution.objective - 2400.0).abs() < TOLERANCE,
            "Z = {} (expected 2400)",
            solution.objective
        );
        assert!((solution.values[0] - 360.0 / 7.0).abs() < TOLERANCE);
        assert!((solution.values[1] - 40.0 / 7.0).abs() < TOLERANCE);
        assert!(solution.values[2].abs() < TOLERANCE);
        assert_feasible(&program, &solution.values);
    }

    #[test]
    fn test_terminal_tableau_is_optimal() {
        let solver = Solver::new();
        let mut tableau = Tableau::from_problem(&three_variable_mix()).unwrap();
        solver.iterate(&mut tableau).unwrap();

        assert_eq!(solver.select_pivot(&tableau), Pivot::Optimal);
        assert!((tableau.objective_value() - 2400.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_unbounded() {
        // maximize x + y with only x - y <= 1: y can grow without limit
        let mut program = LinearProgram::new(vec![Variable::new(); 2]);
        program.set_objective(vec![1.0, 1.0], 0.0).unwrap();
        program.add_constraint(vec![1.0, -1.0], Sense::Le, 1.0).unwrap();

        let result = Solver::new().solve(&mut program);
        assert_eq!(result.unwrap_err(), SolveError::Unbounded);
        // no write-back on failure
        assert!(program.variables().iter().all(|v| v.value() == 0.0));
    }

    #[test]
    fn test_ge_constraint() {
        // maximize x with 1 <= x <= 5
        let mut program = LinearProgram::new(vec![Variable::new(); 1]);
        program.set_objective(vec![1.0], 0.0).unwrap();
        program.add_constraint(vec![1.0], Sense::Le, 5.0).unwrap();
        program.add_constraint(vec![1.0], Sense::Ge, 1.0).unwrap();

        let solution = Solver::new().solve(&mut program).unwrap();
        assert!((solution.values[0] - 5.0).abs() < TOLERANCE);
        assert_feasible(&program, &solution.values);
    }

    #[test]
    fn test_degenerate_pivot_terminates() {
        // the ratio test ties at the first pivot and hits a zero-RHS row at
        // the second; must still reach the optimum Z = 18 at (0, 2)
        let mut program = LinearProgram::new(vec![Variable::new(); 2]);
        program.set_objective(vec![3.0, 9.0], 0.0).unwrap();
        program.add_constraint(vec![1.0, 4.0], Sense::Le, 8.0).unwrap();
        program.add_constraint(vec![1.0, 2.0], Sense::Le, 4.0).unwrap();

        let solution = Solver::new().solve(&mut program).unwrap();
        assert!(
            (solution.objective - 18.0).abs() < TOLERANCE,
            "Z = {} (expected 18)",
            solution.objective
        );
        assert!(solution.iterations <= 100);
        assert_feasible(&program, &solution.values);
    }

    #[test]
    fn test_objective_constant_carried() {
        let mut program = LinearProgram::new(vec![Variable::new(); 1]);
        program.set_objective(vec![2.0], 7.0).unwrap();
        program.add_constraint(vec![1.0], Sense::Le, 3.0).unwrap();

        let solution = Solver::new().solve(&mut program).unwrap();
        assert!((solution.objective - 13.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_iteration_limit() {
        // the three-variable program needs two pivots
        let mut program = three_variable_mix();
        let result = Solver::new().with_max_iterations(1).solve(&mut program);
        assert_eq!(result.unwrap_err(), SolveError::IterationLimitExceeded(1));
    }

    #[test]
    fn test_iteration_limit_exact_fit() {
        // one pivot suffices here, so a cap of 1 must not be misreported
        let mut program = two_variable_mix();
        let solution = Solver::new()
            .with_max_iterations(1)
            .solve(&mut program)
            .unwrap();
        assert!((solution.objective - 36.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_solve_without_objective() {
        let mut program = LinearProgram::new(vec![Variable::new(); 2]);
        let result = Solver::new().solve(&mut program);
        assert_eq!(result.unwrap_err(), SolveError::NoObjective);
    }

    #[test]
    fn test_solve_without_constraints() {
        let mut program = LinearProgram::new(vec![Variable::new(); 2]);
        program.set_objective(vec![1.0, 1.0], 0.0).unwrap();
        let result = Solver::new().solve(&mut program);
        assert_eq!(result.unwrap_err(), SolveError::NoConstraints);
    }
}
