use super::Source;
use paramtree::{deparam, deparam_fragment, deparam_querystring, ParamConfig, Result};

/// Parse `input` and render the resulting tree as JSON.
pub fn handle_parse_command(
    input: &str,
    source: Source,
    coerce: bool,
    pretty: bool,
    config: &ParamConfig,
) -> Result<String> {
    let tree = match source {
        Source::Params => deparam(input, coerce)?,
        Source::Query => deparam_querystring(input, coerce)?,
        Source::Fragment => deparam_fragment(input, coerce, config)?,
    };
    log::debug!("Parsed {} top-level keys from {input:?}", tree.len());

    let json = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    Ok(json)
}
