use crate::Result;
use crate::generation::RunSummary;
use core::fmt::Write;

/// Render the run counters as YAML.
pub fn generate<W: Write>(summary: &RunSummary, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_yaml::to_string(summary)?)?;
    Ok(())
}
