#[cfg(test)]
mod timeframe {
    use alpaca_helper::{Error, Timeframe, TimeframeUnit};

    #[test]
    fn test_parse_grammar_table() {
        let cases = vec![
            ("1Min", 1, TimeframeUnit::Minute),
            ("5Min", 5, TimeframeUnit::Minute),
            ("15Min", 15, TimeframeUnit::Minute),
            ("1H", 1, TimeframeUnit::Hour),
            ("1Hour", 1, TimeframeUnit::Hour),
            ("4H", 4, TimeframeUnit::Hour),
            ("1D", 1, TimeframeUnit::Day),
            ("1Day", 1, TimeframeUnit::Day),
            ("1W", 1, TimeframeUnit::Week),
            ("1Week", 1, TimeframeUnit::Week),
            ("1M", 1, TimeframeUnit::Month),
            ("1Month", 1, TimeframeUnit::Month),
        ];
        for (input, amount, unit) in cases {
            let tf = Timeframe::parse(input).unwrap();
            assert_eq!(tf, Timeframe::new(amount, unit), "input {input:?}");
        }
    }

    #[test]
    fn test_short_and_long_spellings_agree() {
        for (short, long) in [("1H", "1Hour"), ("1D", "1Day"), ("1W", "1Week"), ("1M", "1Month")] {
            assert_eq!(
                Timeframe::parse(short).unwrap(),
                Timeframe::parse(long).unwrap()
            );
        }
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let tf = Timeframe::parse(" 1H ").unwrap();
        assert_eq!(tf, Timeframe::new(1, TimeframeUnit::Hour));
    }

    #[test]
    fn test_invalid_inputs_carry_the_offending_string() {
        for bad in ["", "abc", "Min5", "bogus", "5min", "1min"] {
            match Timeframe::parse(bad) {
                Err(Error::InvalidTimeframe(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidTimeframe for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_display_reparses_to_equal_value() {
        let timeframes = vec![
            Timeframe::new(1, TimeframeUnit::Minute),
            Timeframe::new(5, TimeframeUnit::Minute),
            Timeframe::new(4, TimeframeUnit::Hour),
            Timeframe::new(1, TimeframeUnit::Day),
            Timeframe::new(1, TimeframeUnit::Week),
            Timeframe::new(3, TimeframeUnit::Month),
        ];
        for tf in timeframes {
            let rendered = tf.to_string();
            assert_eq!(Timeframe::parse(&rendered).unwrap(), tf, "via {rendered:?}");
        }
    }

    #[test]
    fn test_from_str_matches_parse() {
        let tf: Timeframe = "15Min".parse().unwrap();
        assert_eq!(tf, Timeframe::new(15, TimeframeUnit::Minute));
    }
}
