use std::fmt;
use std::ops::{Index, IndexMut};

use crate::problem::{LinearProgram, Relation, Sense};
use crate::simplex::SolveError;

/// Dense simplex tableau in standard form.
///
/// Row 0 is the objective row: negated objective coefficients, with the RHS
/// cell holding the current objective value. Rows `1..` hold one constraint
/// each, with one slack column per inequality and the RHS in the last
/// column. Storage is a single contiguous buffer addressed as
/// `tableau[(row, col)]`, with an explicit basis mapping from column to the
/// row it is currently basic in.
pub struct Tableau {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
    basis: Vec<Option<usize>>,
}

impl Tableau {
    /// Lay the program out in standard form.
    ///
    /// GE rows are normalized to LE by negation before slack columns are
    /// counted, so every constraint contributes exactly one slack column,
    /// and each slack column starts basic in its own row.
    pub fn from_problem(program: &LinearProgram) -> Result<Self, SolveError> {
        let objective = program.objective().ok_or(SolveError::NoObjective)?;
        if program.num_constraints() == 0 {
            return Err(SolveError::NoConstraints);
        }

        let constraints: Vec<Relation> =
            program.constraints().iter().map(normalize).collect();

        let slack_count = constraints
            .iter()
            .filter(|c| c.sense != Sense::Eq)
            .count();
        let num_vars = program.num_variables();
        let rows = constraints.len() + 1;
        let cols = num_vars + slack_count + 1;

        let mut tableau = Self {
            values: vec![0.0; rows * cols],
            rows,
            cols,
            basis: vec![None; cols],
        };

        for (j, &coefficient) in objective.coefficients.iter().enumerate() {
            tableau[(0, j)] = -coefficient;
        }
        tableau[(0, cols - 1)] = objective.constant;

        let mut slack = num_vars;
        for (i, constraint) in constraints.iter().enumerate() {
            let row = i + 1;
            for (j, &coefficient) in constraint.coefficients.iter().enumerate() {
                tableau[(row, j)] = coefficient;
            }
            tableau[(row, cols - 1)] = constraint.constant;
            if constraint.sense != Sense::Eq {
                tableau[(row, slack)] = 1.0;
                tableau.basis[slack] = Some(row);
                slack += 1;
            }
        }

        Ok(tableau)
    }

    /// One Gauss-Jordan step: make `col` the unit basis column of `row`.
    ///
    /// The pivot cell is set to exactly 1 rather than divided by itself, and
    /// the eliminated column cells to exactly 0, so unit columns stay unit
    /// columns across pivots.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let divisor = self[(row, col)];
        debug_assert!(divisor != 0.0, "pivot on a zero cell at ({row}, {col})");

        self[(row, col)] = 1.0;
        for j in 0..self.cols {
            if j != col {
                self[(row, j)] /= divisor;
            }
        }

        for i in 0..self.rows {
            if i == row {
                continue;
            }
            let scale = self[(i, col)];
            self[(i, col)] = 0.0;
            if scale == 0.0 {
                continue;
            }
            for j in 0..self.cols {
                if j != col {
                    self[(i, j)] -= scale * self[(row, j)];
                }
            }
        }

        if let Some(leaving) = self.basis.iter().position(|&r| r == Some(row)) {
            self.basis[leaving] = None;
        }
        self.basis[col] = Some(row);
    }

    /// Read the current value of each of the first `count` columns: a basic
    /// column takes its row's RHS, a free column sits at zero.
    pub fn variable_values(&self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|j| match self.basis[j] {
                Some(row) => self[(row, self.cols - 1)],
                None => 0.0,
            })
            .collect()
    }

    /// Current objective value (the row-0 RHS cell).
    pub fn objective_value(&self) -> f64 {
        self[(0, self.cols - 1)]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The constraint row `col` is currently basic in, if any.
    pub fn basis_row(&self, col: usize) -> Option<usize> {
        self.basis[col]
    }
}

/// Rewrite a GE row as LE by negating coefficients and constant.
fn normalize(relation: &Relation) -> Relation {
    match relation.sense {
        Sense::Ge => Relation {
            coefficients: relation.coefficients.iter().map(|c| -c).collect(),
            sense: Sense::Le,
            constant: -relation.constant,
        },
        _ => relation.clone(),
    }
}

impl Index<(usize, usize)> for Tableau {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "tableau index ({row}, {col}) out of bounds"
        );
        &self.values[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Tableau {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "tableau index ({row}, {col}) out of bounds"
        );
        &mut self.values[row * self.cols + col]
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[ ")?;
            for j in 0..self.cols {
                write!(f, "{:.2} ", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
