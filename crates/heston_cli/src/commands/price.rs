//! Price command implementation
//!
//! Reads call quotes (`spot,variance,strike,tau`) from CSV and writes them
//! back with a `price` column, plus `delta` and `variance_sensitivity` when
//! Greeks are requested. A row that cannot be parsed or valued keeps its
//! input fields, leaves the numeric outputs empty and carries the message in
//! the `error` column.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use heston_core::types::PricingError;
use heston_models::analytical::HestonPricer;
use heston_models::valuation::{price_quotes, value_quotes, FiniteDifference, OptionQuote};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::{CliError, Result};

const INPUT_COLUMNS: [&str; 4] = ["spot", "variance", "strike", "tau"];

/// Counts reported after a pricing run.
///
/// `rejected` is the subset of `failed` refused on its inputs (unparseable
/// or out of domain) rather than lost to a numerical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSummary {
    pub rows: usize,
    pub failed: usize,
    pub rejected: usize,
}

/// Run the price command
pub fn run(config: &AppConfig, quotes: &Path, greeks: bool, output: Option<&Path>) -> Result<()> {
    info!("Starting pricing...");
    info!("  Quotes: {}", quotes.display());
    info!("  Greeks: {}", greeks);

    if !quotes.exists() {
        return Err(CliError::FileNotFound(quotes.display().to_string()));
    }

    let pricer = config.pricer()?;
    let settings = config.finite_difference()?;

    let reader = BufReader::new(File::open(quotes)?);
    let summary = price_csv(
        reader,
        super::open_output(output)?,
        &pricer,
        &settings,
        greeks,
    )?;

    info!(
        rows = summary.rows,
        failed = summary.failed,
        rejected = summary.rejected,
        "Pricing complete"
    );
    Ok(())
}

/// Price every row of a quotes CSV.
///
/// The near-expiry policy carried by `settings` applies to prices as well as
/// to the Greeks; the bump is only used when `with_greeks` is set.
pub fn price_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    pricer: &HestonPricer,
    settings: &FiniteDifference,
    with_greeks: bool,
) -> Result<PriceSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let positions = column_positions(&headers)?;

    let mut raw = Vec::new();
    let mut parsed: Vec<std::result::Result<OptionQuote, String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        parsed.push(
            record
                .deserialize::<OptionQuote>(Some(&headers))
                .map_err(|e| e.to_string()),
        );
        raw.push(record);
    }

    let valid: Vec<OptionQuote> = parsed.iter().filter_map(|row| row.clone().ok()).collect();
    let outputs: Vec<std::result::Result<Vec<f64>, PricingError>> = if with_greeks {
        value_quotes(pricer, &valid, settings)
            .into_iter()
            .map(|row| row.map(|v| vec![v.price, v.delta, v.variance_sensitivity]))
            .collect()
    } else {
        price_quotes(pricer, &valid, &settings.policy)
            .into_iter()
            .map(|row| row.map(|price| vec![price]))
            .collect()
    };
    let value_columns = if with_greeks { 3 } else { 1 };
    let mut outputs = outputs.into_iter();

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = INPUT_COLUMNS.to_vec();
    header.push("price");
    if with_greeks {
        header.extend(["delta", "variance_sensitivity"]);
    }
    header.push("error");
    csv_writer.write_record(&header)?;

    let mut summary = PriceSummary {
        rows: 0,
        failed: 0,
        rejected: 0,
    };
    for (index, (record, row)) in raw.iter().zip(parsed).enumerate() {
        let row_number = index + 1;
        let outcome = match row {
            Ok(_) => match outputs.next() {
                Some(Ok(values)) => Ok(values),
                Some(Err(err)) if err.is_validation() => {
                    warn!(row = row_number, error = %err, "Quote rejected");
                    summary.rejected += 1;
                    Err(err.to_string())
                }
                Some(Err(err)) => {
                    error!(row = row_number, error = %err, "Quote could not be valued");
                    Err(err.to_string())
                }
                None => Err("quote was not valued".to_string()),
            },
            Err(message) => {
                warn!(row = row_number, error = %message, "Quote could not be parsed");
                summary.rejected += 1;
                Err(message)
            }
        };

        let mut fields: Vec<String> = positions
            .iter()
            .map(|&i| record.get(i).unwrap_or_default().to_string())
            .collect();
        match outcome {
            Ok(values) => {
                fields.extend(values.iter().map(f64::to_string));
                fields.push(String::new());
            }
            Err(message) => {
                summary.failed += 1;
                fields.extend(std::iter::repeat(String::new()).take(value_columns));
                fields.push(message);
            }
        }
        csv_writer.write_record(&fields)?;
        summary.rows += 1;
    }

    csv_writer.flush()?;
    Ok(summary)
}

fn column_positions(headers: &csv::StringRecord) -> Result<Vec<usize>> {
    INPUT_COLUMNS
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("quotes file has no '{}' column", name))
                })
        })
        .collect()
}
