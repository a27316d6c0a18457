use thiserror::Error;

/// Constraints a program accepts by default before `add_constraint` starts
/// failing with [`ProblemError::TooManyConstraints`].
pub const DEFAULT_CONSTRAINT_CAPACITY: usize = 16;

/// A decision variable slot owned by the caller.
///
/// Slots start at zero; a successful solve writes the optimal value into
/// every slot of the program it was given. Variables are identified by
/// position within the program, not by name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Variable {
    value: f64,
}

impl Variable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value written by the most recent successful solve.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn assign(&mut self, value: f64) {
        self.value = value;
    }
}

/// Comparison sense of a relation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

/// A row of coefficients together with a comparison sense and a constant.
///
/// Both the objective (stored as an `Eq` row) and every constraint are
/// relations over the owning program's variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// One coefficient per variable, in variable order
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub sense: Sense,
    /// Right-hand side value
    pub constant: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("objective has already been set")]
    ObjectiveAlreadySet,
    #[error("objective must be set before constraints are added")]
    MissingObjective,
    #[error("expected {expected} coefficients, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("constraint capacity of {limit} reached")]
    TooManyConstraints { limit: usize },
    #[error("equality constraints are not supported")]
    UnsupportedSense,
}

/// A linear program in `maximize c'x subject to Ax <= b, x >= 0` form.
///
/// The objective must be set exactly once, before any constraint is added;
/// at least one constraint must exist before solving.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    variables: Vec<Variable>,
    objective: Option<Relation>,
    constraints: Vec<Relation>,
    constraint_capacity: usize,
}

impl LinearProgram {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self {
            variables,
            objective: None,
            constraints: Vec::new(),
            constraint_capacity: DEFAULT_CONSTRAINT_CAPACITY,
        }
    }

    /// Replace the default constraint capacity.
    pub fn with_constraint_capacity(mut self, capacity: usize) -> Self {
        self.constraint_capacity = capacity;
        self
    }

    /// Set the maximization objective `c'x + constant`.
    pub fn set_objective(
        &mut self,
        coefficients: Vec<f64>,
        constant: f64,
    ) -> Result<(), ProblemError> {
        if self.objective.is_some() {
            return Err(ProblemError::ObjectiveAlreadySet);
        }
        self.check_dimensions(&coefficients)?;
        self.objective = Some(Relation {
            coefficients,
            sense: Sense::Eq,
            constant,
        });
        Ok(())
    }

    /// Add a `<=` or `>=` constraint over all variables.
    pub fn add_constraint(
        &mut self,
        coefficients: Vec<f64>,
        sense: Sense,
        constant: f64,
    ) -> Result<(), ProblemError> {
        if self.objective.is_none() {
            return Err(ProblemError::MissingObjective);
        }
        if sense == Sense::Eq {
            return Err(ProblemError::UnsupportedSense);
        }
        if self.constraints.len() == self.constraint_capacity {
            return Err(ProblemError::TooManyConstraints {
                limit: self.constraint_capacity,
            });
        }
        self.check_dimensions(&coefficients)?;
        self.constraints.push(Relation {
            coefficients,
            sense,
            constant,
        });
        Ok(())
    }

    fn check_dimensions(&self, coefficients: &[f64]) -> Result<(), ProblemError> {
        if coefficients.len() != self.variables.len() {
            return Err(ProblemError::DimensionMismatch {
                expected: self.variables.len(),
                found: coefficients.len(),
            });
        }
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn objective(&self) -> Option<&Relation> {
        self.objective.as_ref()
    }

    pub fn constraints(&self) -> &[Relation] {
        &self.constraints
    }

    pub(crate) fn assign_values(&mut self, values: &[f64]) {
        for (slot, &value) in self.variables.iter_mut().zip(values) {
            slot.assign(value);
        }
    }
}
