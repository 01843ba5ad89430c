use anyhow::{Context, Result};
use clap::Args;
use genesis_pgen::{
    BlockSummary, InputFile, MeshBlock, ParameterInput, RelativisticSummary, TheoryComparison,
    TimeDensityProblem,
};

use super::ParameterArgs;

/// Arguments for `genesis init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Simulation time [default: `time/start_time`, or 0]
    #[arg(short, long, allow_negative_numbers = true)]
    pub time: Option<f64>,

    /// Active cells along x1 [default: `mesh/nx1`, or 64]
    #[arg(long)]
    pub nx1: Option<usize>,

    /// Active cells along x2 [default: `mesh/nx2`, or 1]
    #[arg(long)]
    pub nx2: Option<usize>,

    /// Active cells along x3 [default: `mesh/nx3`, or 1]
    #[arg(long)]
    pub nx3: Option<usize>,

    /// Ghost cells on each side of an active direction
    #[arg(long, default_value_t = 2)]
    pub nghost: usize,

    /// Also print the resolved input file, defaults included
    #[arg(long)]
    pub dump: bool,
}

/// Runs the problem generator on a freshly allocated block.
pub fn execute(args: InitArgs) -> Result<()> {
    let mut pin = args.params.load()?;

    let time = match args.time {
        Some(time) => time,
        None => pin.get_or_add_real("time", "start_time", 0.0)?,
    };
    let nx1 = mesh_size(&pin, "nx1", args.nx1, 64)?;
    let nx2 = mesh_size(&pin, "nx2", args.nx2, 1)?;
    let nx3 = mesh_size(&pin, "nx3", args.nx3, 1)?;

    let mut block = MeshBlock::new(nx1, nx2, nx3, args.nghost)
        .with_context(|| format!("cannot allocate a {nx1}x{nx2}x{nx3} block"))?;

    let report = TimeDensityProblem
        .generate(&mut pin, &mut block, time)
        .context("problem generator failed")?;
    println!("{report}");

    let summary = BlockSummary::of(&block, report.parameters.gamma);
    let comparison = TheoryComparison::new(&summary, &report.parameters, time);
    println!();
    println!("{comparison}");
    println!();
    println!("{}", RelativisticSummary::of(&block));

    if args.dump {
        println!();
        print!("{pin}");
    }

    Ok(())
}

/// Resolves a mesh size from the command line, then the input file, then `default`.
fn mesh_size(pin: &InputFile, name: &str, flag: Option<usize>, default: usize) -> Result<usize> {
    if let Some(n) = flag {
        return Ok(n);
    }

    match pin.get("mesh", name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("mesh/{name} must be a cell count, found `{value}`")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_size_prefers_flag_then_file_then_default() {
        let pin = InputFile::parse("<mesh>\nnx1 = 32\nnx2 = wide\n").unwrap();

        assert_eq!(mesh_size(&pin, "nx1", Some(8), 64).unwrap(), 8);
        assert_eq!(mesh_size(&pin, "nx1", None, 64).unwrap(), 32);
        assert_eq!(mesh_size(&pin, "nx3", None, 1).unwrap(), 1);
        assert!(mesh_size(&pin, "nx2", None, 1).is_err());
    }
}
