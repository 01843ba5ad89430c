pub mod init;
pub mod sample;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use genesis_pgen::InputFile;

/// Where problem parameters come from.
#[derive(Args, Debug)]
pub struct ParameterArgs {
    /// Input file in `<block>` / `name = value` layout
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override a parameter, e.g. `--set problem/alpha=0.02`
    #[arg(long = "set", value_name = "BLOCK/NAME=VALUE")]
    pub overrides: Vec<String>,
}

impl ParameterArgs {
    /// Loads the input file, if any, and applies overrides on top of it.
    pub fn load(&self) -> Result<InputFile> {
        let mut pin = match &self.input {
            Some(path) => InputFile::read(path)?,
            None => InputFile::new(),
        };

        for entry in &self.overrides {
            pin.apply_override(entry)
                .with_context(|| format!("invalid --set `{entry}`"))?;
        }

        if pin.is_empty() {
            log::info!("no parameters given, using defaults");
        }
        Ok(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_without_input_file() {
        let args = ParameterArgs {
            input: None,
            overrides: vec!["problem/beta=2".into()],
        };
        let pin = args.load().unwrap();
        assert_eq!(pin.get("problem", "beta"), Some("2"));
    }

    #[test]
    fn bad_override_is_reported() {
        let args = ParameterArgs {
            input: None,
            overrides: vec!["beta=2".into()],
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("invalid --set `beta=2`"));
    }

    #[test]
    fn bundled_input_file_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/athinput.time_density");
        let args = ParameterArgs {
            input: Some(path.into()),
            overrides: Vec::new(),
        };
        let pin = args.load().unwrap();
        assert_eq!(pin.get("problem", "epsilon"), Some("0.001"));
        assert_eq!(pin.get("mesh", "nx1"), Some("64"));
    }
}
