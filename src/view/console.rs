//! Plain-text view for the interactive session.

use std::io::{self, Write};

use crate::model::Payment;
use crate::view::{RenderData, ViewPort};

/// Renders every surface as text to a writer (stdout in the binary).
///
/// Prefixing the CDN base onto image paths happens here: the core hands out
/// relative paths only.
pub struct ConsoleView<W: Write> {
    out: W,
    cdn_url: String,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout(cdn_url: String) -> Self {
        Self::new(io::stdout(), cdn_url)
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, cdn_url: String) -> Self {
        Self {
            out,
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
        }
    }

    fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.cdn_url, path)
    }

    fn draw(&mut self, data: &RenderData) -> io::Result<()> {
        match data {
            RenderData::Gallery { cards } => {
                writeln!(self.out, "--- catalog ({} items) ---", cards.len())?;
                for card in cards {
                    writeln!(
                        self.out,
                        "  [{}] {} ({}) - {}",
                        card.id,
                        card.title,
                        card.category,
                        price_label(card.price),
                    )?;
                }
            }
            RenderData::BasketCounter { count } => {
                writeln!(self.out, "(basket: {count})")?;
            }
            RenderData::Preview(preview) => {
                writeln!(self.out, "--- {} ---", preview.card.title)?;
                writeln!(self.out, "  {}", preview.description)?;
                writeln!(self.out, "  image: {}", self.image_url(&preview.card.image))?;
                writeln!(self.out, "  price: {}", price_label(preview.card.price))?;
                let action = if preview.in_basket {
                    "remove from basket"
                } else if preview.can_buy {
                    "add to basket"
                } else {
                    "not available"
                };
                writeln!(self.out, "  [{action}]")?;
            }
            RenderData::Basket(page) => {
                writeln!(self.out, "--- basket ---")?;
                for line in &page.lines {
                    writeln!(
                        self.out,
                        "  {}. [{}] {} - {}",
                        line.index,
                        line.id,
                        line.title,
                        price_label(line.price),
                    )?;
                }
                writeln!(self.out, "  total: {}", page.total)?;
                if page.can_checkout {
                    writeln!(self.out, "  [checkout]")?;
                } else {
                    writeln!(self.out, "  (basket is empty)")?;
                }
            }
            RenderData::OrderForm(form) => {
                writeln!(self.out, "--- order: payment and address ---")?;
                writeln!(self.out, "  payment: {}", payment_label(form.payment))?;
                writeln!(self.out, "  address: {}", field_label(&form.address))?;
                for error in &form.errors {
                    writeln!(self.out, "  ! {error}")?;
                }
                if form.valid {
                    writeln!(self.out, "  [submit]")?;
                }
            }
            RenderData::ContactForm(form) => {
                writeln!(self.out, "--- order: contacts ---")?;
                writeln!(self.out, "  email: {}", field_label(&form.email))?;
                writeln!(self.out, "  phone: {}", field_label(&form.phone))?;
                for error in &form.errors {
                    writeln!(self.out, "  ! {error}")?;
                }
                if form.valid {
                    writeln!(self.out, "  [confirm]")?;
                }
            }
            RenderData::Success { total } => {
                writeln!(self.out, "--- order placed ---")?;
                writeln!(self.out, "  {total} written off")?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ViewPort for ConsoleView<W> {
    fn render(&mut self, data: RenderData) {
        if let Err(err) = self.draw(&data) {
            tracing::warn!(error = %err, "console render failed");
        }
    }

    fn close_modal(&mut self) {
        if let Err(err) = writeln!(self.out, "(closed)") {
            tracing::warn!(error = %err, "console render failed");
        }
    }
}

fn price_label(price: Option<u64>) -> String {
    match price {
        Some(value) => format!("{value}"),
        None => "not for sale".to_string(),
    }
}

fn payment_label(payment: Option<Payment>) -> &'static str {
    match payment {
        Some(Payment::Card) => "card",
        Some(Payment::Cash) => "cash",
        None => "<not selected>",
    }
}

fn field_label(value: &str) -> &str {
    if value.is_empty() { "<empty>" } else { value }
}
