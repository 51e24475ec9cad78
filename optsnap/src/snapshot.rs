use chrono::{Local, NaiveDateTime, Timelike};
use optsnap_core::{
    Capability, CombinedRow, Decimal, HistoryRequest, Instrument, Interval, OptionChain, Range,
    SnapError, SnapReport, TIMESTAMP_FORMAT, TickerOutcome, expiration_label, latest_close,
    round_quote, select_and_merge, strike_window,
};

use crate::Snapshotter;
use crate::sink::{append_rows, snapshot_file_name};

/// Nearest-expiration chain together with its expiration.
#[derive(Debug, Clone)]
pub struct NearestChain {
    /// Expiration as UTC epoch seconds, as listed by the provider.
    pub expiration: i64,
    /// Expiration rendered `YYYY-MM-DD`, used in the output file name.
    pub label: String,
    /// Calls and puts for that expiration.
    pub chain: OptionChain,
}

/// Local wall-clock time truncated to whole seconds.
fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

impl Snapshotter {
    /// Latest trade price for `inst`, rounded to two decimals.
    ///
    /// Reads one day of daily candles and takes the close of the most recent one.
    /// Only connectors that natively serve daily candles are considered.
    ///
    /// # Errors
    /// Returns `NoData` when the history has no candles, or the provider's error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optsnap::snapshot::latest_price",
            skip(self),
            fields(symbol = %inst.symbol()),
        )
    )]
    pub async fn latest_price(&self, inst: &Instrument) -> Result<Decimal, SnapError> {
        let kind = *inst.kind();
        let c = self.connector_for(inst, Capability::History, |c| {
            c.as_history_provider()
                .is_some_and(|h| h.supported_history_intervals(kind).contains(&Interval::D1))
        })?;
        let hp = c
            .as_history_provider()
            .ok_or_else(|| SnapError::unsupported(Capability::History.as_str()))?;
        let req = HistoryRequest::try_from_range(Range::D1, Interval::D1)?;

        let history = self
            .provider_call(c.name(), Capability::History, hp.history(inst, req))
            .await?;
        latest_close(&history)
            .map(round_quote)
            .ok_or_else(|| SnapError::no_data(format!("price history for {}", inst.symbol())))
    }

    /// Option chain for the soonest listed expiration of `inst`.
    ///
    /// # Errors
    /// Returns `NoExpirations` when the provider lists none, or the provider's error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optsnap::snapshot::nearest_chain",
            skip(self),
            fields(symbol = %inst.symbol()),
        )
    )]
    pub async fn nearest_chain(&self, inst: &Instrument) -> Result<NearestChain, SnapError> {
        let c = self.connector_for(inst, Capability::OptionsExpirations, |c| {
            c.as_options_expirations_provider().is_some()
        })?;
        let ep = c
            .as_options_expirations_provider()
            .ok_or_else(|| SnapError::unsupported(Capability::OptionsExpirations.as_str()))?;
        let expirations = self
            .provider_call(
                c.name(),
                Capability::OptionsExpirations,
                ep.options_expirations(inst),
            )
            .await?;
        let expiration = *expirations.first().ok_or_else(|| SnapError::NoExpirations {
            symbol: inst.symbol().to_string(),
        })?;
        let label = expiration_label(expiration)?;

        let c = self.connector_for(inst, Capability::OptionChain, |c| {
            c.as_option_chain_provider().is_some()
        })?;
        let cp = c
            .as_option_chain_provider()
            .ok_or_else(|| SnapError::unsupported(Capability::OptionChain.as_str()))?;
        let chain = self
            .provider_call(
                c.name(),
                Capability::OptionChain,
                cp.option_chain(inst, Some(expiration)),
            )
            .await?;

        Ok(NearestChain {
            expiration,
            label,
            chain,
        })
    }

    /// Keep the configured strike window around `quote` and join calls with puts on strike.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the configured strike step is zero.
    pub fn select_and_merge(
        &self,
        chain: &OptionChain,
        quote: Decimal,
        captured_at: NaiveDateTime,
    ) -> Result<Vec<CombinedRow>, SnapError> {
        let window = strike_window(quote, self.cfg.strike_step, self.cfg.strikes_each_side)?;
        Ok(select_and_merge(chain, quote, &window, captured_at))
    }

    /// Append `rows` to the file for `symbol` at `expiration_label` and return its name.
    ///
    /// # Errors
    /// Returns `Io` or `Csv` when the append fails.
    pub fn persist(
        &self,
        symbol: &str,
        expiration_label: &str,
        rows: &[CombinedRow],
    ) -> Result<String, SnapError> {
        let file = snapshot_file_name(symbol, expiration_label);
        let path = self.cfg.output_dir.join(&file);
        let _created = append_rows(&path, rows)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "optsnap::sink",
            path = %path.display(),
            created = _created,
            rows = rows.len(),
            "appended snapshot rows"
        );
        Ok(file)
    }

    /// Fetch, select, merge and persist one ticker.
    ///
    /// # Errors
    /// Returns the first error raised by any step; nothing is written when fetching fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "optsnap::snapshot::snapshot_ticker", skip(self))
    )]
    pub async fn snapshot_ticker(&self, symbol: &str) -> Result<TickerOutcome, SnapError> {
        let inst = Instrument::from_symbol(symbol, optsnap_core::AssetKind::Equity)?;
        let quote = self.latest_price(&inst).await?;
        let nearest = self.nearest_chain(&inst).await?;

        let captured_at = now_local();
        let rows = self.select_and_merge(&nearest.chain, quote, captured_at)?;
        #[cfg(feature = "tracing")]
        if rows.is_empty() {
            tracing::warn!(
                target: "optsnap::snapshot",
                symbol,
                expiration = %nearest.label,
                "no strikes in the window are listed on both sides"
            );
        }

        let file = self.persist(symbol, &nearest.label, &rows)?;
        Ok(TickerOutcome::Saved {
            symbol: symbol.to_string(),
            file,
            rows: rows.len(),
            captured_at: captured_at.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Snapshot every configured ticker in order.
    ///
    /// A failing ticker is recorded as `TickerOutcome::Failed` and the run moves on;
    /// nothing is retried. Always returns after attempting every ticker.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optsnap::snapshot::run",
            skip(self),
            fields(tickers = self.cfg.tickers.len()),
        )
    )]
    pub async fn run(&self) -> SnapReport {
        let mut outcomes = Vec::with_capacity(self.cfg.tickers.len());
        for symbol in &self.cfg.tickers {
            let outcome = match self.snapshot_ticker(symbol).await {
                Ok(saved) => saved,
                Err(error) => TickerOutcome::Failed {
                    symbol: symbol.clone(),
                    error,
                },
            };
            #[cfg(feature = "tracing")]
            match &outcome {
                TickerOutcome::Saved { file, rows, .. } => {
                    tracing::info!(
                        target: "optsnap::snapshot",
                        symbol = %symbol,
                        file = %file,
                        rows,
                        "saved"
                    );
                }
                TickerOutcome::Failed { error, .. } => {
                    tracing::warn!(
                        target: "optsnap::snapshot",
                        symbol = %symbol,
                        error = %error,
                        actionable = error.is_actionable(),
                        "ticker failed"
                    );
                }
            }
            outcomes.push(outcome);
        }
        SnapReport { outcomes }
    }
}
