use clap::Parser;
use oms_core::domain::common::{FilterConfig, OmsConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "oms", about = "Order management API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    /// Prefix prepended to every route, e.g. `/oms`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FilterArgs {
    #[arg(
        long = "filter-max-page-size",
        env = "FILTER_MAX_PAGE_SIZE",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..=100)
    )]
    pub max_page_size: u64,

    /// Query keys dropped before filters are classified.
    #[arg(
        long = "filter-ignored-params",
        env = "FILTER_IGNORED_PARAMS",
        value_delimiter = ','
    )]
    pub ignored_params: Vec<String>,
}

impl From<Args> for OmsConfig {
    fn from(args: Args) -> Self {
        Self {
            filter: FilterConfig {
                max_page_size: args.filter.max_page_size,
                ignored_params: args
                    .filter
                    .ignored_params
                    .into_iter()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["oms"]).unwrap();
        assert_eq!(args.server.root_path, "");

        let config = OmsConfig::from(args);
        assert_eq!(config.filter.max_page_size, 100);
        assert!(config.filter.ignored_params.is_empty());
    }

    #[test]
    fn test_filter_flags() {
        let args = Args::try_parse_from([
            "oms",
            "--server-root-path",
            "/oms",
            "--filter-max-page-size",
            "50",
            "--filter-ignored-params",
            "benefitIds, _ts",
        ])
        .unwrap();

        let config = OmsConfig::from(args);
        assert_eq!(config.filter.max_page_size, 50);
        assert_eq!(config.filter.ignored_params, vec!["benefitIds", "_ts"]);
    }

    #[test]
    fn test_page_size_above_cap_is_rejected() {
        assert!(Args::try_parse_from(["oms", "--filter-max-page-size", "101"]).is_err());
        assert!(Args::try_parse_from(["oms", "--filter-max-page-size", "0"]).is_err());
    }
}
