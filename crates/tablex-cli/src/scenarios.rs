use tablex_solver::{LinearProgram, ProblemError, Sense, Variable};

/// A built-in example program.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Result<LinearProgram, ProblemError>,
}

impl Scenario {
    pub fn build(&self) -> Result<LinearProgram, ProblemError> {
        (self.build)()
    }
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "workshop",
        description: "maximize 6x + 9y under two shared-capacity limits",
        build: workshop,
    },
    Scenario {
        name: "factory",
        description: "maximize 40x1 + 60x2 + 50x3 under three resource limits",
        build: factory,
    },
];

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

fn workshop() -> Result<LinearProgram, ProblemError> {
    let mut program = LinearProgram::new(vec![Variable::new(); 2]);
    program.set_objective(vec![6.0, 9.0], 0.0)?;
    program.add_constraint(vec![2.0, 3.0], Sense::Le, 12.0)?;
    program.add_constraint(vec![1.0, 1.0], Sense::Le, 5.0)?;
    Ok(program)
}

fn factory() -> Result<LinearProgram, ProblemError> {
    let mut program = LinearProgram::new(vec![Variable::new(); 3]);
    program.set_objective(vec![40.0, 60.0, 50.0], 0.0)?;
    program.add_constraint(vec![4.0, 6.0, 5.0], Sense::Le, 240.0)?;
    program.add_constraint(vec![3.0, 8.0, 6.0], Sense::Le, 200.0)?;
    program.add_constraint(vec![2.0, 3.0, 4.0], Sense::Le, 120.0)?;
    Ok(program)
}
