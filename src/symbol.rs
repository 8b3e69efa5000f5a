use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Side of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// Fields decoded from an OCC option contract symbol.
///
/// When the symbol cannot be decoded the record degrades instead of erroring:
/// `underlying` keeps the whole input and every derived field is `None`.
/// Callers iterating a chain of symbols check [`OptionSymbolInfo::is_parsed`]
/// and skip the entry rather than aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSymbolInfo {
    pub underlying: String,
    pub expiration: Option<NaiveDate>,
    pub option_type: Option<OptionType>,
    pub strike: Option<f64>,
}

impl OptionSymbolInfo {
    fn unparsed(symbol: &str) -> Self {
        Self {
            underlying: symbol.to_string(),
            expiration: None,
            option_type: None,
            strike: None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.expiration.is_some()
    }
}

/// Decodes an OCC-format option symbol such as `AAPL250117C00150000` into
/// underlying, expiration, type and strike.
///
/// The trailing 15 characters are fixed width: a 6-digit `YYMMDD` expiration
/// (year 2000 + YY), one `C`/`P` type indicator and an 8-digit strike in
/// thousandths. The type indicator is located by scanning left to right for
/// the first `C` or `P` with at least 6 characters before it and exactly 9
/// characters from it to the end; a ticker containing `C` or `P` at a
/// position that happens to satisfy that arithmetic is misparsed, which is
/// the documented behavior of this format's consumers.
///
/// This function is total: malformed input of any shape produces the
/// degraded record, never an error.
pub fn parse_option_symbol(symbol: &str) -> OptionSymbolInfo {
    decode(symbol).unwrap_or_else(|| OptionSymbolInfo::unparsed(symbol))
}

fn decode(symbol: &str) -> Option<OptionSymbolInfo> {
    let type_index = symbol
        .bytes()
        .enumerate()
        .find(|&(i, b)| {
            (b == b'C' || b == b'P') && i >= 6 && symbol.len() - i == 9
        })
        .map(|(i, _)| i)?;

    let underlying = symbol.get(..type_index - 6)?;
    let exp = symbol.get(type_index - 6..type_index)?;
    let year: i32 = exp.get(..2)?.parse().ok()?;
    let month: u32 = exp.get(2..4)?.parse().ok()?;
    let day: u32 = exp.get(4..6)?.parse().ok()?;
    let expiration = NaiveDate::from_ymd_opt(2000 + year, month, day)?;

    let option_type = if symbol.as_bytes()[type_index] == b'C' {
        OptionType::Call
    } else {
        OptionType::Put
    };

    let strike_raw: u32 = symbol.get(type_index + 1..type_index + 9)?.parse().ok()?;
    let strike = f64::from(strike_raw) / 1000.0;

    Some(OptionSymbolInfo {
        underlying: underlying.to_string(),
        expiration: Some(expiration),
        option_type: Some(option_type),
        strike: Some(strike),
    })
}
