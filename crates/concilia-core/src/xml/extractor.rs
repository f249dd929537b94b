//! Fiscal field extraction from SUNAT UBL invoice XML.
//!
//! Elements are located by namespace-resolved paths under the cbc/cac
//! namespaces; the first occurrence of each target wins. Extraction is
//! fail-fast: a missing node, a non-numeric amount or a missing currency
//! attribute aborts the whole record.

use std::str::FromStr;

use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::XmlError;
use crate::fiscal::{UBL_CAC_NS, UBL_CBC_NS};
use crate::models::{Currency, FiscalInvoice};

/// Namespace class of an element on the path stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Cbc,
    Cac,
    Other,
}

impl Ns {
    fn resolve(result: &ResolveResult<'_>) -> Self {
        match result {
            ResolveResult::Bound(Namespace(ns)) if *ns == UBL_CBC_NS.as_bytes() => Ns::Cbc,
            ResolveResult::Bound(Namespace(ns)) if *ns == UBL_CAC_NS.as_bytes() => Ns::Cac,
            _ => Ns::Other,
        }
    }
}

type PathSegment = (Ns, String);

fn ends_with(path: &[PathSegment], tail: &[(Ns, &str)]) -> bool {
    if path.len() < tail.len() {
        return false;
    }
    path[path.len() - tail.len()..]
        .iter()
        .zip(tail)
        .all(|((ns, name), (tns, tname))| ns == tns && name == tname)
}

fn under(path: &[PathSegment], ns: Ns, name: &str) -> bool {
    path.iter().any(|(pns, pname)| *pns == ns && pname == name)
}

/// Accumulator for the raw text of each target element.
#[derive(Default)]
struct RawFiscal {
    supplier_ruc: Option<String>,
    supplier_name: Option<String>,
    buyer_ruc: Option<String>,
    document_id: Option<String>,
    issue_date: Option<String>,
    taxable_base: Option<String>,
    tax: Option<String>,
    total: Option<String>,
    currency: Option<String>,
}

impl RawFiscal {
    fn collect(&mut self, path: &[PathSegment], text: &str) {
        if ends_with(path, &[(Ns::Cac, "PartyIdentification"), (Ns::Cbc, "ID")]) {
            if under(path, Ns::Cac, "AccountingSupplierParty") {
                set_first(&mut self.supplier_ruc, text);
            } else if under(path, Ns::Cac, "AccountingCustomerParty") {
                set_first(&mut self.buyer_ruc, text);
            }
        } else if ends_with(
            path,
            &[(Ns::Cac, "PartyLegalEntity"), (Ns::Cbc, "RegistrationName")],
        ) && under(path, Ns::Cac, "AccountingSupplierParty")
        {
            set_first(&mut self.supplier_name, text);
        } else if path.len() == 2 && ends_with(path, &[(Ns::Cbc, "ID")]) {
            set_first(&mut self.document_id, text);
        } else if path.len() == 2 && ends_with(path, &[(Ns::Cbc, "IssueDate")]) {
            set_first(&mut self.issue_date, text);
        } else if ends_with(path, &[(Ns::Cac, "TaxSubtotal"), (Ns::Cbc, "TaxableAmount")]) {
            set_first(&mut self.taxable_base, text);
        } else if ends_with(path, &[(Ns::Cac, "TaxTotal"), (Ns::Cbc, "TaxAmount")]) {
            set_first(&mut self.tax, text);
        } else if ends_with(
            path,
            &[(Ns::Cac, "LegalMonetaryTotal"), (Ns::Cbc, "PayableAmount")],
        ) {
            set_first(&mut self.total, text);
        }
    }

    fn into_fiscal(self) -> Result<FiscalInvoice, XmlError> {
        let supplier_ruc = self
            .supplier_ruc
            .ok_or(XmlError::MissingElement("cac:PartyIdentification/cbc:ID"))?;
        let supplier_name = self.supplier_name.ok_or(XmlError::MissingElement(
            "cac:PartyLegalEntity/cbc:RegistrationName",
        ))?;
        let document_id = self.document_id.ok_or(XmlError::MissingElement("cbc:ID"))?;

        let raw_date = self.issue_date.ok_or(XmlError::MissingElement("cbc:IssueDate"))?;
        let issue_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| XmlError::InvalidDate(raw_date))?;

        let taxable_base = parse_amount(
            "cbc:TaxableAmount",
            self.taxable_base
                .ok_or(XmlError::MissingElement("cbc:TaxableAmount"))?,
        )?;
        let tax = parse_amount(
            "cbc:TaxAmount",
            self.tax.ok_or(XmlError::MissingElement("cbc:TaxAmount"))?,
        )?;
        let total = parse_amount(
            "cbc:PayableAmount",
            self.total.ok_or(XmlError::MissingElement("cbc:PayableAmount"))?,
        )?;

        let currency = Currency::from_code(&self.currency.ok_or(XmlError::MissingCurrency)?);

        Ok(FiscalInvoice {
            supplier_ruc,
            supplier_name,
            buyer_ruc: self.buyer_ruc,
            document_id,
            issue_date,
            currency,
            taxable_base,
            tax,
            total,
        })
    }
}

fn set_first(slot: &mut Option<String>, text: &str) {
    if slot.is_none() {
        *slot = Some(text.to_string());
    }
}

fn parse_amount(field: &'static str, value: String) -> Result<Decimal, XmlError> {
    Decimal::from_str(value.trim()).map_err(|_| XmlError::InvalidAmount { field, value })
}

/// Extract the fiscal record from a UBL invoice document.
pub fn extract_fiscal(data: &[u8]) -> Result<FiscalInvoice, XmlError> {
    let mut reader = NsReader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut raw = RawFiscal::default();
    let mut path: Vec<PathSegment> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((resolve, Event::Start(e))) => {
                let ns = Ns::resolve(&resolve);
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                // The payable total's currency attribute is captured at the
                // start event; the amount itself arrives as text.
                if ns == Ns::Cbc
                    && local == "PayableAmount"
                    && under(&path, Ns::Cac, "LegalMonetaryTotal")
                    && raw.currency.is_none()
                {
                    if let Ok(Some(attr)) = e.try_get_attribute("currencyID") {
                        if let Ok(value) = attr.unescape_value() {
                            raw.currency = Some(value.into_owned());
                        }
                    }
                }

                path.push((ns, local));
            }
            Ok((_, Event::Text(t))) => {
                let text = t.unescape().unwrap_or_default();
                if !text.is_empty() {
                    raw.collect(&path, &text);
                }
            }
            Ok((_, Event::End(_))) => {
                path.pop();
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(XmlError::Malformed(e.to_string())),
        }
        buf.clear();
    }

    let fiscal = raw.into_fiscal()?;
    debug!(
        "extracted fiscal record {} from {} for {} {}",
        fiscal.document_id, fiscal.supplier_ruc, fiscal.total, fiscal.currency
    );
    Ok(fiscal)
}
