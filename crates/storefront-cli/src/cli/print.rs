use colored::Colorize;
use storefront::api::{CmdMessage, MessageLevel, OrderLink};
use storefront::commands::order::format_inr;
use storefront::commands::view::cycle_image;
use storefront::model::Product;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 15;
const TYPE_WIDTH: usize = 18;
const PRICE_WIDTH: usize = 12;
const NEW_MARKER: &str = "NEW";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_products(products: &[Product], empty_message: &str) {
    if products.is_empty() {
        println!("{}", empty_message);
        return;
    }

    for product in products {
        let marker = if product.is_new {
            format!(" {}", NEW_MARKER)
        } else {
            "    ".to_string()
        };
        let fixed_width = ID_WIDTH + TYPE_WIDTH + PRICE_WIDTH + marker.width();
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let name = truncate_to_width(&product.name, available);
        let padding = available.saturating_sub(name.width());
        let product_type = truncate_to_width(&product.product_type, TYPE_WIDTH);
        let type_padding = TYPE_WIDTH.saturating_sub(product_type.width());
        let price = format!("₹{}", format_inr(product.price));
        let price = format!("{:>width$}", price, width = PRICE_WIDTH);
        let id = format!("{:<width$}", product.id, width = ID_WIDTH);

        println!(
            "{}{}{}{}{}{}{}",
            id.dimmed(),
            name,
            " ".repeat(padding),
            product_type,
            " ".repeat(type_padding),
            price,
            marker.yellow(),
        );
    }
}

/// Detail view. `image` counts from 1 and wraps around the gallery.
pub(super) fn print_product(product: &Product, image: Option<usize>) {
    let badge = if product.is_new {
        format!(" {}", NEW_MARKER.yellow())
    } else {
        String::new()
    };
    println!("{}{}", product.name.bold(), badge);
    println!("--------------------------------");
    println!("{:<12}{}", "Id:", product.id);
    println!("{:<12}{}", "Category:", product.category.label());
    println!("{:<12}{}", "Type:", product.product_type);
    println!("{:<12}₹{}", "Price:", format_inr(product.price));
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    let count = product.images.len();
    if count == 0 {
        return;
    }
    println!();
    let current = cycle_image(count, image.unwrap_or(1).saturating_sub(1), 0);
    for (i, uri) in product.images.iter().enumerate() {
        let label = format!("[{}/{}]", i + 1, count);
        if i == current {
            println!("{} {} {}", ">".yellow(), label.yellow(), uri);
        } else {
            println!("  {} {}", label.dimmed(), uri.dimmed());
        }
    }
    if count > 1 {
        let prev = cycle_image(count, current, -1) + 1;
        let next = cycle_image(count, current, 1) + 1;
        println!(
            "{}",
            format!("prev: --image {}   next: --image {}", prev, next).dimmed()
        );
    }
}

pub(super) fn print_order(link: &OrderLink) {
    println!("{}", link.message);
    println!();
    println!("{} {}", "Open to send:".green(), link.url);
}

pub(super) fn print_config_entry(key: &str, value: &str) {
    let value = if value.is_empty() { "(unset)" } else { value };
    let key = format!("{:<22}", key);
    println!("{}{}", key.bold(), value);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
