use chrono::NaiveDate;

use crate::Result;
use crate::client::{AlpacaClient, Credentials};
use crate::models::{OptionData, OptionSnapshotsResponse};

static OPTIONS_PATH: &str = "/v1beta1/options";

/// Helper client for option snapshots and chains.
///
/// Every returned [`OptionData`] carries strike, expiration and type decoded
/// from the contract symbol. Symbols that do not decode stay in the result
/// with those fields absent so one stray entry never aborts a whole chain.
#[derive(Debug, Clone)]
pub struct OptionsClient {
    client: AlpacaClient,
}

impl OptionsClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::new(credentials)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::from_env()?,
        })
    }

    /// Complete information for one contract, or `None` when the feed has no
    /// snapshot for it.
    pub async fn option(&self, symbol: &str) -> Result<Option<OptionData>> {
        let mut all = self.options(&[symbol]).await?;
        if all.is_empty() {
            return Ok(None);
        }
        Ok(Some(all.swap_remove(0)))
    }

    /// Snapshot batch for several contracts in one call.
    #[tracing::instrument(skip(self))]
    pub async fn options(&self, symbols: &[&str]) -> Result<Vec<OptionData>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.client.data_url(&format!("{OPTIONS_PATH}/snapshots"))?;
        let query = [("symbols", symbols.join(","))];
        let mut out = Vec::new();
        self.client
            .get_paged(url, &query, |res: OptionSnapshotsResponse| {
                out.extend(
                    res.snapshots
                        .iter()
                        .map(|(symbol, snapshot)| OptionData::from_snapshot(symbol, snapshot)),
                );
                true
            })
            .await?;
        Ok(out)
    }

    /// Full option chain for an underlying, optionally filtered to one
    /// expiration date. The filter compares against the expiration decoded
    /// from each contract symbol, so undecodable symbols are filtered out
    /// when a date is given and kept otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn option_chain(
        &self,
        underlying: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<Vec<OptionData>> {
        let url = self
            .client
            .data_url(&format!("{OPTIONS_PATH}/snapshots/{underlying}"))?;
        let mut query = Vec::new();
        if let Some(date) = expiration {
            query.push(("expiration_date", date.format("%Y-%m-%d").to_string()));
        }
        let mut chain = Vec::new();
        self.client
            .get_paged(url, &query, |res: OptionSnapshotsResponse| {
                chain.extend(
                    res.snapshots
                        .iter()
                        .map(|(symbol, snapshot)| OptionData::from_snapshot(symbol, snapshot))
                        .filter(|data| match expiration {
                            Some(date) => data.expiration == Some(date),
                            None => true,
                        }),
                );
                true
            })
            .await?;
        Ok(chain)
    }
}
