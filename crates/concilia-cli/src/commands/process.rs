//! Process command - reconcile one invoice against one purchase order.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use concilia_core::ReconciliationRecord;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Invoice XML (SUNAT UBL)
    #[arg(long)]
    xml: PathBuf,

    /// Invoice PDF rendering
    #[arg(long)]
    pdf: PathBuf,

    /// Purchase order PDF
    #[arg(long)]
    oc: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned name/value table
    Table,
    /// JSON output
    Json,
    /// CSV output (one row)
    Csv,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let xml = read_input(&args.xml)?;
    let pdf = read_input(&args.pdf)?;
    let oc = read_input(&args.oc)?;

    info!("processing {}", args.xml.display());

    let record = concilia_core::reconcile_documents(Some(&xml), Some(&pdf), Some(&oc))?;
    debug!("record assembled for {}", record.document_id);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read(path)?)
}

fn format_record(record: &ReconciliationRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Table => Ok(format_table(record)),
    }
}

fn format_csv(record: &ReconciliationRecord) -> anyhow::Result<String> {
    let fields = record.fields();
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(fields.iter().map(|(name, _)| *name))?;
    wtr.write_record(fields.iter().map(|(_, value)| value.as_str()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_table(record: &ReconciliationRecord) -> String {
    let fields = record.fields();
    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut output = String::new();
    for (name, value) in fields {
        output.push_str(&format!("{:<width$}  {}\n", name, value));
    }
    output
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use concilia_core::{Currency, MatchVerdict};
    use rust_decimal::Decimal;

    use super::*;

    fn sample_record() -> ReconciliationRecord {
        ReconciliationRecord {
            supplier_ruc: "20100070970".to_string(),
            supplier_name: "SERVICIOS GENERALES SAC".to_string(),
            document_id: "F001-00000056".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            currency: Currency::Pen,
            taxable_base: Decimal::new(100_00, 2),
            tax: Decimal::new(18_00, 2),
            total: Decimal::new(118_00, 2),
            detraction_code: "N/A".to_string(),
            detraction_rate: Decimal::ZERO,
            detraction_amount: Decimal::ZERO,
            net_payable: Decimal::new(118_00, 2),
            invoice_po: "045-12".to_string(),
            order_po: "45-12".to_string(),
            po_match: MatchVerdict::Match,
            cost_center: "ADMIN".to_string(),
            payment_terms: "CONTADO".to_string(),
            approval_status: "PENDIENTE".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row() {
        let csv = format_csv(&sample_record()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("RUC proveedor,"));
        assert!(lines[1].contains("MATCH"));
    }

    #[test]
    fn test_table_lists_every_field() {
        let table = format_table(&sample_record());
        assert_eq!(table.lines().count(), sample_record().fields().len());
        assert!(table.contains("Neto a pagar"));
    }
}
