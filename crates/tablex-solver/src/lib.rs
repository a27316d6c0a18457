mod problem;
mod simplex;
mod solution;
mod tableau;

pub use problem::{
    DEFAULT_CONSTRAINT_CAPACITY, LinearProgram, ProblemError, Relation, Sense, Variable,
};
pub use simplex::{SolveError, Solver};
pub use solution::Solution;
pub use tableau::Tableau;
