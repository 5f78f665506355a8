use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerRow {
    #[serde(rename = "Customer ID")]
    pub(crate) customer_id: u64,
    #[serde(rename = "First Name")]
    pub(crate) first_name: String,
    #[serde(rename = "Last Name")]
    pub(crate) last_name: String,
    #[serde(rename = "Age")]
    pub(crate) age: u32,
    #[serde(rename = "Phone Number")]
    pub(crate) phone_number: String,
    #[serde(rename = "Monthly Salary")]
    pub(crate) monthly_salary: u64,
    #[serde(rename = "Approved Limit")]
    pub(crate) approved_limit: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoanRow {
    #[serde(rename = "Customer ID")]
    pub(crate) customer_id: u64,
    #[serde(rename = "Loan ID")]
    pub(crate) loan_id: u64,
    #[serde(rename = "Loan Amount")]
    pub(crate) loan_amount: f64,
    #[serde(rename = "Tenure")]
    pub(crate) tenure: u32,
    #[serde(rename = "Interest Rate")]
    pub(crate) interest_rate: f64,
    #[serde(rename = "Monthly payment")]
    pub(crate) monthly_payment: f64,
    #[serde(rename = "EMIs paid on Time")]
    pub(crate) emis_paid_on_time: u32,
    #[serde(rename = "Date of Approval")]
    pub(crate) approval_date: String,
    #[serde(rename = "End Date")]
    pub(crate) end_date: String,
}

/// Rows paired with their 1-based line number in the source (header is line 1).
pub(crate) fn parse_rows<R, T>(reader: R) -> Result<Vec<(usize, T)>, csv::Error>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<T>().enumerate() {
        rows.push((index + 2, record?));
    }

    Ok(rows)
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}
