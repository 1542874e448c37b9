#[cfg(test)]
mod tests {
    use clap::Parser;
    use hourbank::commands::ZeroArgs;

    #[derive(Debug, Parser)]
    struct ZeroCli {
        #[command(flatten)]
        zero: ZeroArgs,
    }

    fn parse(args: &[&str]) -> ZeroArgs {
        ZeroCli::try_parse_from(std::iter::once("hourbank").chain(args.iter().copied()))
            .unwrap()
            .zero
    }

    #[test]
    fn test_zero_flags_follow_config_by_default() {
        assert!(parse(&[]).resolve(true));
        assert!(!parse(&[]).resolve(false));
    }

    #[test]
    fn test_zero_flags_override_config_both_ways() {
        assert!(parse(&["--zero"]).resolve(false));
        assert!(parse(&["-z"]).resolve(false));
        assert!(!parse(&["--no-zero"]).resolve(true));
    }

    #[test]
    fn test_zero_flags_conflict() {
        assert!(ZeroCli::try_parse_from(["hourbank", "--zero", "--no-zero"]).is_err());
    }
}
