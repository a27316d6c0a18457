mod scenarios;

use clap::{Parser, Subcommand};
use tablex_solver::{Solver, Tableau};

#[derive(Parser)]
#[command(name = "tablex")]
#[command(about = "Tableau simplex solver for built-in example programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in example programs
    List,
    /// Solve a built-in example program
    Solve {
        /// Scenario name (see `list`)
        scenario: String,
        /// Print the solution as JSON
        #[arg(long)]
        json: bool,
        /// Print the initial tableau before solving
        #[arg(long)]
        tableau: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for scenario in scenarios::SCENARIOS {
                println!("{:10} {}", scenario.name, scenario.description);
            }
        }
        Commands::Solve {
            scenario,
            json,
            tableau,
        } => {
            let Some(scenario) = scenarios::find(&scenario) else {
                eprintln!("Unknown scenario: {scenario}");
                std::process::exit(1);
            };

            let mut program = match scenario.build() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Invalid program: {e}");
                    std::process::exit(1);
                }
            };

            if tableau {
                match Tableau::from_problem(&program) {
                    Ok(t) => print!("{t}"),
                    Err(e) => {
                        eprintln!("Cannot build tableau: {e}");
                        std::process::exit(1);
                    }
                }
            }

            let solver = Solver::new();
            match solver.solve(&mut program) {
                Ok(solution) => {
                    if json {
                        match serde_json::to_string_pretty(&solution) {
                            Ok(out) => println!("{out}"),
                            Err(e) => {
                                eprintln!("Cannot serialize solution: {e}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        println!("Z = {:.2}", solution.objective);
                        for (i, value) in solution.values.iter().enumerate() {
                            println!("x{} = {:.2}", i + 1, value);
                        }
                        println!("({} pivots)", solution.iterations);
                    }
                }
                Err(e) => {
                    eprintln!("Solve failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
