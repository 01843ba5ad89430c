use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use genesis_model::{Sample, TimeRange, sample};
use genesis_pgen::ProblemParameters;

use super::ParameterArgs;

/// Output layout for sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

/// Arguments for `genesis sample`.
#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// First sample time
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,

    /// Last sample time
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub end: f64,

    /// Number of evenly spaced samples, endpoints included
    #[arg(short = 'n', long, default_value_t = 101)]
    pub count: usize,

    #[arg(long, value_enum, default_value = "csv")]
    pub format: Format,
}

/// Evaluates both models over the requested range and writes them to stdout.
pub fn execute(args: SampleArgs) -> Result<()> {
    let mut pin = args.params.load()?;
    let params = ProblemParameters::read(&mut pin)?;
    for warning in params.check() {
        log::warn!("{warning}");
    }

    let range = TimeRange::new(args.start, args.end, args.count)?;
    let samples = sample(
        &range,
        &params.density_model(),
        &params.flow_ratio_model(),
    )?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_samples(&mut out, &samples, args.format)?;
    out.flush()?;
    Ok(())
}

fn write_samples<W: Write>(out: &mut W, samples: &[Sample], format: Format) -> Result<()> {
    match format {
        Format::Csv => {
            writeln!(out, "time,density,curvature,flow_ratio")?;
            for s in samples {
                writeln!(
                    out,
                    "{},{},{},{}",
                    s.time, s.density, s.curvature, s.flow_ratio
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, samples)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
