//! `confstack get`

use anyhow::{bail, Result};

use confstack::application::{ConfigQuery, QueryResult};
use confstack::presentation::{OutputFormat, ValueRenderer};

use super::CommandContext;

pub fn cmd_get(
    ctx: &CommandContext,
    key: Option<&str>,
    format: OutputFormat,
    show_origin: bool,
) -> Result<()> {
    let format = if ctx.json { OutputFormat::Json } else { format };
    if show_origin && !format.supports_origin() {
        bail!("the `--show-origin` flag is only supported with `--format toml`");
    }

    let resolution = ctx.resolve()?;
    ctx.report_diagnostics(&resolution);

    let result = ConfigQuery::new(&resolution.config).query(key)?;
    let QueryResult::Found { key, value } = result else {
        bail!("config value `{}` is not set", result.key());
    };

    let rendered = ValueRenderer::new(resolution.config.registry())
        .with_show_origin(show_origin)
        .render(&key, &value, format)?;
    if format == OutputFormat::Toml {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
