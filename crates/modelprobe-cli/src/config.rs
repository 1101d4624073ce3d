use std::ffi::OsStr;
use std::time::Duration;

use modelprobe_common::{CatalogSource, ModelId, PathConvention, PayloadTemplate, ProbeConfig};
use modelprobe_engine::ModelFilter;

use crate::args::{Args, PathStyle};

pub fn build_config(args: &Args) -> ProbeConfig {
    let catalog_source = match &args.models {
        Some(models) => CatalogSource::Static(
            models
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(ModelId::from)
                .collect(),
        ),
        None => CatalogSource::Remote,
    };

    ProbeConfig {
        base_url: args.base_url.clone(),
        credential: args.api_key.clone().filter(|k| !k.is_empty()),
        max_workers: args.workers,
        per_call_timeout: Duration::from_secs(args.timeout_secs),
        catalog_timeout: Duration::from_secs(args.catalog_timeout_secs),
        dispatch_interval: Duration::from_millis(args.interval_ms),
        path_convention: match args.path_convention {
            PathStyle::Standard => PathConvention::Standard,
            PathStyle::AlternateGateway => PathConvention::AlternateGateway,
        },
        catalog_source,
        payload: PayloadTemplate::new(&args.prompt, args.max_tokens),
    }
}

/// Colors are on unless `--no-color` is given or `NO_COLOR` holds any non-empty value.
pub fn color_enabled(args: &Args, no_color_env: Option<&OsStr>) -> bool {
    !args.no_color && no_color_env.is_none_or(|v| v.is_empty())
}

pub fn build_filter(args: &Args) -> ModelFilter {
    ModelFilter {
        include: args.include.clone(),
        exclude: args.exclude.clone(),
        dedupe: args.dedupe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["modelprobe"]).unwrap();
        let cfg = build_config(&args);

        assert_eq!(cfg.base_url, "https://api.openai.com");
        assert_eq!(cfg.max_workers, 2);
        assert_eq!(cfg.per_call_timeout, Duration::from_secs(10));
        assert_eq!(cfg.dispatch_interval, Duration::ZERO);
        assert_eq!(cfg.path_convention, PathConvention::Standard);
        assert_eq!(cfg.catalog_source, CatalogSource::Remote);
        assert_eq!(cfg.payload, PayloadTemplate::default());
    }

    #[test]
    fn test_static_list_and_gateway() {
        let args = Args::try_parse_from([
            "modelprobe",
            "--models",
            "gpt-4o, claude,",
            "--path-convention",
            "alternate-gateway",
            "--interval-ms",
            "250",
            "--api-key",
            "sk-1",
            "--exclude",
            "mini",
            "--exclude",
            "preview",
            "--dedupe",
        ])
        .unwrap();
        let cfg = build_config(&args);

        assert_eq!(
            cfg.catalog_source,
            CatalogSource::Static(vec![ModelId::from("gpt-4o"), ModelId::from("claude")])
        );
        assert_eq!(cfg.path_convention, PathConvention::AlternateGateway);
        assert_eq!(cfg.dispatch_interval, Duration::from_millis(250));
        assert_eq!(cfg.credential.as_deref(), Some("sk-1"));

        let filter = build_filter(&args);
        assert_eq!(filter.exclude, vec!["mini", "preview"]);
        assert!(filter.dedupe);
    }

    #[test]
    fn test_color_follows_no_color_convention() {
        let args = Args::try_parse_from(["modelprobe"]).unwrap();
        assert!(color_enabled(&args, None));
        assert!(color_enabled(&args, Some(OsStr::new(""))));
        for value in ["1", "0", "false", "no", "off"] {
            assert!(!color_enabled(&args, Some(OsStr::new(value))), "NO_COLOR={value}");
        }

        let args = Args::try_parse_from(["modelprobe", "--no-color"]).unwrap();
        assert!(!color_enabled(&args, None));
    }

    #[test]
    fn test_zero_workers_fails_validation() {
        let args = Args::try_parse_from(["modelprobe", "--workers", "0"]).unwrap();
        assert!(build_config(&args).validate().is_err());
    }
}
