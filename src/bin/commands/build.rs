use super::Target;
use paramtree::{build_fragment, build_querystring, MergeMode, ParamConfig, Result};

pub fn handle_build_command(
    url: &str,
    params: &str,
    target: Target,
    mode: MergeMode,
    config: &ParamConfig,
) -> Result<String> {
    match target {
        Target::Query => build_querystring(url, params, mode),
        Target::Fragment => build_fragment(url, params, mode, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_targets() {
        let config = ParamConfig::default();
        assert_eq!(
            handle_build_command("/p?a=1#f", "b=2", Target::Query, MergeMode::Merge, &config)
                .unwrap(),
            "/p?a=1&b=2#f"
        );
        assert_eq!(
            handle_build_command("/p?a=1#f=1", "g=2", Target::Fragment, MergeMode::Replace, &config)
                .unwrap(),
            "/p?a=1#g=2"
        );
    }
}
