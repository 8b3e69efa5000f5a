#[cfg(test)]
mod symbol {
    use alpaca_helper::{OptionType, parse_option_symbol};
    use chrono::NaiveDate;

    #[test]
    fn test_worked_examples() {
        let info = parse_option_symbol("AAPL250117C00150000");
        assert_eq!(info.underlying, "AAPL");
        assert_eq!(info.expiration, NaiveDate::from_ymd_opt(2025, 1, 17));
        assert_eq!(info.option_type, Some(OptionType::Call));
        assert_eq!(info.strike, Some(150.0));

        let info = parse_option_symbol("SPY241220P00450000");
        assert_eq!(info.underlying, "SPY");
        assert_eq!(info.expiration, NaiveDate::from_ymd_opt(2024, 12, 20));
        assert_eq!(info.option_type, Some(OptionType::Put));
        assert_eq!(info.strike, Some(450.0));

        let info = parse_option_symbol("TSLA250321C00225500");
        assert_eq!(info.underlying, "TSLA");
        assert_eq!(info.expiration, NaiveDate::from_ymd_opt(2025, 3, 21));
        assert_eq!(info.strike, Some(225.5));
    }

    #[test]
    fn test_round_trip_over_ticker_lengths() {
        for (ticker, ymd, indicator, strike_field, strike) in [
            ("F", (2026, 6, 19), 'C', "00012000", 12.0),
            ("GM", (2025, 9, 19), 'P', "00042500", 42.5),
            ("AMZN", (2025, 1, 17), 'C', "00185000", 185.0),
            ("GOOGL", (2024, 3, 15), 'P', "00139990", 139.99),
        ] {
            let symbol = format!(
                "{}{:02}{:02}{:02}{}{}",
                ticker,
                ymd.0 - 2000,
                ymd.1,
                ymd.2,
                indicator,
                strike_field
            );
            let info = parse_option_symbol(&symbol);
            assert_eq!(info.underlying, ticker, "symbol {symbol}");
            assert_eq!(info.expiration, NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2));
            assert_eq!(
                info.option_type,
                Some(if indicator == 'C' {
                    OptionType::Call
                } else {
                    OptionType::Put
                })
            );
            assert_eq!(info.strike, Some(strike));
        }
    }

    #[test]
    fn test_degraded_record_keeps_the_input() {
        let info = parse_option_symbol("INVALID");
        assert_eq!(info.underlying, "INVALID");
        assert!(info.expiration.is_none());
        assert!(info.option_type.is_none());
        assert!(info.strike.is_none());
        assert!(!info.is_parsed());
    }

    #[test]
    fn test_total_over_malformed_inputs() {
        // the codec never fails, it degrades; every input here must come
        // back as an unparsed record without panicking
        let inputs = [
            "",
            "C",
            "P00450000",
            "AAPL",
            "short",
            "AAPL250117C0015000",   // strike one digit short
            "AAPL250117C001500000", // strike one digit long
            "AAPL2501170050000000", // no indicator at all
            "AAPLxxxxxxC00150000", // non-numeric date
            "AAPL250117C0015000x",
            "aapl250117c00150000", // lowercase indicator is not scanned
        ];
        for input in inputs {
            let info = parse_option_symbol(input);
            assert_eq!(info.underlying, input, "input {input:?}");
            assert!(!info.is_parsed(), "input {input:?}");
        }
    }

    #[test]
    fn test_first_indicator_satisfying_the_arithmetic_wins() {
        // every C/P in the ticker sits too early to leave exactly 9 trailing
        // characters, so the scan lands on the real indicator
        let info = parse_option_symbol("CPC250117C00150000");
        assert_eq!(info.underlying, "CPC");
        assert_eq!(info.option_type, Some(OptionType::Call));
    }

    #[test]
    fn test_embedded_letters_before_the_date_are_skipped() {
        let info = parse_option_symbol("PCAR250620P00105000");
        assert_eq!(info.underlying, "PCAR");
        assert_eq!(info.expiration, NaiveDate::from_ymd_opt(2025, 6, 20));
        assert_eq!(info.option_type, Some(OptionType::Put));
        assert_eq!(info.strike, Some(105.0));
    }

    #[test]
    fn test_impossible_calendar_dates_degrade() {
        for input in ["AAPL251301C00150000", "AAPL250230C00150000", "AAPL250100C00150000"] {
            assert!(!parse_option_symbol(input).is_parsed(), "input {input:?}");
        }
    }

    #[test]
    fn test_zero_strike_parses() {
        let info = parse_option_symbol("XYZ250117C00000000");
        assert_eq!(info.strike, Some(0.0));
    }
}
