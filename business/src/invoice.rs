//! Tax-invoice fields derived from a subscription.
//!
//! Layout and rendering belong to the UI; this module only produces the values:
//! amounts with Indian digit grouping and a rupee glyph, date-only strings, and the
//! total spelled out in Indian numbering (crore, lakh, thousand, hundred).

use thiserror::Error;

use crate::models::Subscription;
use crate::table::date_part;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

fn below_hundred(n: u64, parts: &mut Vec<String>) {
    let n = n % 100;
    if n == 0 {
        return;
    }
    if n < 20 {
        parts.push(ONES[n as usize].to_owned());
        return;
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => parts.push(tens.to_owned()),
        ones => parts.push(format!("{tens} {}", ONES[ones as usize])),
    }
}

fn spell(n: u64, parts: &mut Vec<String>) {
    let crore = n / CRORE;
    if crore > 0 {
        // Counts above 99 crore recurse: "One Hundred Crore".
        spell(crore, parts);
        parts.push("Crore".to_owned());
    }
    let rest = n % CRORE;

    let lakh = rest / LAKH;
    if lakh > 0 {
        below_hundred(lakh, parts);
        parts.push("Lakh".to_owned());
    }
    let thousand = (rest / 1_000) % 100;
    if thousand > 0 {
        below_hundred(thousand, parts);
        parts.push("Thousand".to_owned());
    }
    let hundred = (rest / 100) % 10;
    if hundred > 0 {
        parts.push(ONES[hundred as usize].to_owned());
        parts.push("Hundred".to_owned());
    }
    below_hundred(rest, parts);
}

/// Whole rupees in words: `150000` is "One Lakh Fifty Thousand Rupees Only".
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "Zero Rupees Only".to_owned();
    }
    let mut parts = Vec::new();
    spell(n, &mut parts);
    format!("{} Rupees Only", parts.join(" "))
}

/// Amount in paise formatted as `₹1,50,000.00`.
pub fn format_inr(paise: u64) -> String {
    let rupees = (paise / 100).to_string();
    let fraction = paise % 100;

    let grouped = if rupees.len() <= 3 {
        rupees
    } else {
        let (head, last_three) = rupees.split_at(rupees.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{last_three}", groups.join(","))
    };
    format!("₹{grouped}.{fraction:02}")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    #[error("{0} is missing")]
    MissingAmount(&'static str),
    #[error("{field} '{value}' is not a valid amount")]
    InvalidAmount { field: &'static str, value: String },
}

/// Parse "1,50,000.50", "₹ 999" or "1200" into paise.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<u64, InvoiceError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Err(InvoiceError::MissingAmount(field));
    }
    let invalid = || InvoiceError::InvalidAmount {
        field,
        value: raw.to_owned(),
    };

    let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }
    let rupees: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    // Paise beyond two digits are truncated.
    let paise: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => fraction[..2].parse().map_err(|_| invalid())?,
    };
    rupees
        .checked_mul(100)
        .and_then(|v| v.checked_add(paise))
        .ok_or_else(invalid)
}

/// Every value printed on the tax invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub invoice_number: String,
    pub invoice_date: String,
    pub customer_name: String,
    pub customer_mobile: String,
    pub customer_email: String,
    pub package_name: String,
    pub start_date: String,
    pub expiry_date: String,
    pub transaction_id: String,
    pub subtotal: String,
    pub gst: String,
    pub total: String,
    pub total_in_words: String,
}

impl Invoice {
    pub fn from_subscription(sub: &Subscription) -> Result<Self, InvoiceError> {
        let subtotal = parse_amount("amount", &sub.actual_amount)?;
        let gst = match sub.gst.trim() {
            "" => 0,
            raw => parse_amount("gst", raw)?,
        };
        let total = match sub.total_amount.trim() {
            "" => subtotal.saturating_add(gst),
            raw => parse_amount("total", raw)?,
        };

        let invoice_number = sub
            .invoice_number
            .clone()
            .unwrap_or_else(|| format!("INV-{}", sub.id));

        Ok(Self {
            invoice_number,
            invoice_date: date_part(sub.created_at.as_deref().unwrap_or_default()).to_owned(),
            customer_name: sub.name.clone(),
            customer_mobile: sub.mobile.clone(),
            customer_email: sub.email.clone(),
            package_name: sub.package_name.clone(),
            start_date: date_part(sub.subscription_start_date.as_deref().unwrap_or_default())
                .to_owned(),
            expiry_date: date_part(sub.subscription_expiry_date.as_deref().unwrap_or_default())
                .to_owned(),
            transaction_id: sub.transaction_id.clone(),
            subtotal: format_inr(subtotal),
            gst: format_inr(gst),
            total: format_inr(total),
            total_in_words: number_to_words(total / 100),
        })
    }
}

/// Shown when the invoice screen is opened without a subscription.
pub const NO_SUBSCRIPTION_MESSAGE: &str = "No subscription selected. Open an invoice from the subscriptions table.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_for_zero() {
        assert_eq!(number_to_words(0), "Zero Rupees Only");
    }

    #[test]
    fn words_for_one_and_a_half_lakh() {
        assert_eq!(
            number_to_words(150_000),
            "One Lakh Fifty Thousand Rupees Only"
        );
    }

    #[test]
    fn words_across_every_group() {
        assert_eq!(
            number_to_words(12_34_56_789),
            "Twelve Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine Rupees Only"
        );
        assert_eq!(number_to_words(15), "Fifteen Rupees Only");
        assert_eq!(number_to_words(100), "One Hundred Rupees Only");
        assert_eq!(number_to_words(1_00_000), "One Lakh Rupees Only");
        assert_eq!(number_to_words(20_01_010), "Twenty Lakh One Thousand Ten Rupees Only");
    }

    #[test]
    fn crore_counts_above_ninety_nine_recurse() {
        assert_eq!(
            number_to_words(100 * CRORE),
            "One Hundred Crore Rupees Only"
        );
        assert_eq!(
            number_to_words(1_50_000 * CRORE),
            "One Lakh Fifty Thousand Crore Rupees Only"
        );
    }

    #[test]
    fn inr_grouping() {
        assert_eq!(format_inr(0), "₹0.00");
        assert_eq!(format_inr(99_950), "₹999.50");
        assert_eq!(format_inr(1_50_000_00), "₹1,50,000.00");
        assert_eq!(format_inr(12_34_56_789_05), "₹12,34,56,789.05");
        assert_eq!(format_inr(1_000_00), "₹1,000.00");
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount("amount", "1,50,000"), Ok(1_50_000_00));
        assert_eq!(parse_amount("amount", "₹ 999.5"), Ok(99_950));
        assert_eq!(parse_amount("amount", "12.345"), Ok(1_234));
        assert_eq!(
            parse_amount("amount", ""),
            Err(InvoiceError::MissingAmount("amount"))
        );
        assert!(parse_amount("amount", "12a").is_err());
        assert!(parse_amount("amount", "-5").is_err());
        assert!(parse_amount("amount", ".").is_err());
    }
}
