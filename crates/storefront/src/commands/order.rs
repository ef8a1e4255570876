//! Order hand-off: a pre-filled chat message and the deep link that opens it.
//! Nothing is sent or awaited here; the link is handed to whatever opens URLs.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Product;
use crate::store::DataStore;

use super::view::find;

pub const ORDER_LINK_BASE: &str = "https://wa.me";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLink {
    pub message: String,
    pub url: String,
}

pub fn run<S: DataStore>(store: &S, id: &str, phone: &str) -> Result<CmdResult> {
    let product = find(store, id)?;
    let link = compose(&product, phone);
    Ok(CmdResult::default()
        .with_listed_products(vec![product])
        .with_order(link))
}

pub fn compose(product: &Product, phone: &str) -> OrderLink {
    let message = format!(
        "Hi, I'm interested in purchasing:\n\n\
         Product: {}\n\
         Type: {}\n\
         Price: ₹{}\n\n\
         Please provide more details about this product.",
        product.name,
        product.product_type,
        format_inr(product.price)
    );
    let url = format!(
        "{}/{}?text={}",
        ORDER_LINK_BASE,
        phone.trim_start_matches('+'),
        urlencoding::encode(&message)
    );
    OrderLink { message, url }
}

/// Format an amount with Indian digit grouping: `123456.5` → `1,23,456.5`.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    if digits.len() <= 3 {
        grouped.push_str(int_part);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.extend(tail);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
