use super::Host;
use super::common::{CommonArgs, build_model, init_logging};
use crate::Result;
use crate::reports::generate_console;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run discovery and rule validation without writing anything, then print the summary.
///
/// # Errors
///
/// Returns an error if configuration, discovery or validation fails
pub fn check_sources<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let result = args.common.load_config().and_then(|config| build_model(&config));

    match result {
        Ok(model) => {
            let mut console_output = String::new();
            generate_console(&model, args.common.color.use_colors(), &mut console_output)?;
            let _ = write!(host.output(), "{console_output}");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Check failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
