use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug, Default)]
pub struct InitArgs {
    /// Output configuration file path (default is `dashgen.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

/// Write the default configuration file.
///
/// # Errors
///
/// Returns an error if the file exists and `--force` is not given, or if it cannot be written
pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(CONFIG_FILE_NAME));

    if output.exists() && !args.force {
        bail!("'{output}' already exists, use --force to overwrite it");
    }

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::config::DEFAULT_CONFIG_TOML;
    use crate::commands::host::TestHost;
    use std::fs;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_writes_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("dashgen.toml")).unwrap();

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false }).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), DEFAULT_CONFIG_TOML);
        assert!(host.output_text().contains("Generated default configuration file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("dashgen.toml")).unwrap();
        fs::write(&output, "sources = [\"lib\"]\n").unwrap();

        let mut host = TestHost::new();
        assert!(init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false }).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "sources = [\"lib\"]\n");

        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: true }).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), DEFAULT_CONFIG_TOML);
    }
}
