//! # Line Commands
//!
//! The headless driver's input language. One command per line:
//!
//! ```text
//! add <product-id>                      press "add" on a shown product card
//! carousel next | prev | add            carousel arrows and the slide's add button
//! ribbon <category-id>                  select a category ("" or "all" = All)
//! slider click <fraction>               click the track
//! slider key left|right|home|end        keyboard steps
//! slider drag <f1> <f2> .. <fn>         drag: moves to f1..f(n-1), release at fn
//! slider drag <f1> .. cancel            drag that loses pointer capture
//! nuts on|off    veg on|off             filter checkboxes
//! cart open | close                     cart icon / Escape
//! cart inc <id> | cart dec <id>         checkout view counters
//! order <name>|<email>|<tel>|<address>  submit the delivery form
//! show [json]                           print the storefront state
//! quit
//! ```

use std::str::FromStr;

use storefront_checkout::{CheckoutError, OrderForm};
use storefront_core::{CoreError, StepDirection};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::storefront::Storefront;
use crate::widgets::{PointerEvent, SliderTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    CarouselNext,
    CarouselPrev,
    CarouselAdd,
    Ribbon(String),
    SliderClick(f64),
    SliderKey(StepDirection),
    SliderDrag { path: Vec<f64>, cancel: bool },
    Nuts(bool),
    Vegetarian(bool),
    CartOpen,
    CartClose,
    CartAdjust { product_id: String, delta: i64 },
    Order(OrderForm),
    Show { json: bool },
    Quit,
}

fn unknown(line: &str) -> AppError {
    AppError::UnknownCommand(line.to_string())
}

fn parse_switch(value: Option<&str>, line: &str) -> AppResult<bool> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(unknown(line)),
    }
}

fn parse_fraction(value: &str, line: &str) -> AppResult<f64> {
    value.parse::<f64>().map_err(|_| unknown(line))
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| unknown(line))?;

        let command = match head {
            "add" => Command::Add(words.next().ok_or_else(|| unknown(line))?.to_string()),
            "carousel" => match words.next() {
                Some("next") => Command::CarouselNext,
                Some("prev") => Command::CarouselPrev,
                Some("add") => Command::CarouselAdd,
                _ => return Err(unknown(line)),
            },
            "ribbon" => {
                let id = words.next().unwrap_or("");
                let id = match id {
                    "all" | "\"\"" => "",
                    other => other,
                };
                Command::Ribbon(id.to_string())
            }
            "slider" => match words.next() {
                Some("click") => {
                    let fraction = words.next().ok_or_else(|| unknown(line))?;
                    Command::SliderClick(parse_fraction(fraction, line)?)
                }
                Some("key") => {
                    let direction = match words.next() {
                        Some("left") => StepDirection::Previous,
                        Some("right") => StepDirection::Next,
                        Some("home") => StepDirection::First,
                        Some("end") => StepDirection::Last,
                        _ => return Err(unknown(line)),
                    };
                    Command::SliderKey(direction)
                }
                Some("drag") => {
                    let mut path = Vec::new();
                    let mut cancel = false;
                    for word in words.by_ref() {
                        if word == "cancel" {
                            cancel = true;
                            break;
                        }
                        path.push(parse_fraction(word, line)?);
                    }
                    if path.is_empty() {
                        return Err(unknown(line));
                    }
                    Command::SliderDrag { path, cancel }
                }
                _ => return Err(unknown(line)),
            },
            "nuts" => Command::Nuts(parse_switch(words.next(), line)?),
            "veg" => Command::Vegetarian(parse_switch(words.next(), line)?),
            "cart" => match words.next() {
                Some("open") => Command::CartOpen,
                Some("close") => Command::CartClose,
                Some(op @ ("inc" | "dec")) => Command::CartAdjust {
                    product_id: words.next().ok_or_else(|| unknown(line))?.to_string(),
                    delta: if op == "inc" { 1 } else { -1 },
                },
                _ => return Err(unknown(line)),
            },
            "order" => {
                let rest = line["order".len()..].trim();
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [name, email, tel, address] = fields.as_slice() else {
                    return Err(unknown(line));
                };
                Command::Order(OrderForm::new(*name, *email, *tel, *address))
            }
            "show" => Command::Show {
                json: words.next() == Some("json"),
            },
            "quit" | "exit" => Command::Quit,
            _ => return Err(unknown(line)),
        };

        if words.next().is_some() && !matches!(command, Command::Order(_)) {
            return Err(unknown(line));
        }
        Ok(command)
    }
}

/// What the driver should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print this and read the next line.
    Continue(String),
    Quit,
}

/// Runs one command against `storefront`.
pub async fn execute(storefront: &Storefront, command: Command) -> AppResult<Outcome> {
    debug!(?command, "Executing command");

    match command {
        Command::Add(product_id) => {
            if !storefront.grid().add(&product_id) {
                return Err(CoreError::ProductNotFound(product_id).into());
            }
        }
        Command::CarouselNext => {
            storefront.carousel().next();
        }
        Command::CarouselPrev => {
            storefront.carousel().prev();
        }
        Command::CarouselAdd => storefront.carousel().add_current(),
        Command::Ribbon(id) => {
            if !storefront.ribbon().select(&id) {
                return Err(unknown(&format!("ribbon {id}")));
            }
        }
        Command::SliderClick(fraction) => {
            storefront.slider().click(SliderTarget::Track, fraction);
        }
        Command::SliderKey(direction) => {
            storefront.slider().key(direction);
        }
        Command::SliderDrag { path, cancel } => {
            drag(storefront, &path, cancel);
        }
        Command::Nuts(checked) => {
            storefront.nuts().set(checked);
        }
        Command::Vegetarian(checked) => {
            storefront.vegetarian().set(checked);
        }
        Command::CartOpen => {
            if storefront.store().is_empty() {
                return Err(CheckoutError::EmptyCart.into());
            }
            if storefront.checkout().is_open() {
                return Err(CheckoutError::CheckoutAlreadyOpen.into());
            }
            storefront.cart_icon().activate();
        }
        Command::CartClose => {
            storefront.checkout().close();
        }
        Command::CartAdjust { product_id, delta } => {
            let pressed = if delta > 0 {
                storefront.checkout().increment(&product_id)
            } else {
                storefront.checkout().decrement(&product_id)
            };
            if !pressed {
                return Err(CoreError::ProductNotFound(product_id).into());
            }
        }
        Command::Order(form) => {
            let receipt = storefront.checkout().submit(form).await?;
            return Ok(Outcome::Continue(format!(
                "order {} placed: {} item(s), {}\n{}",
                receipt.order_id,
                receipt.item_count,
                receipt.total,
                render(storefront)
            )));
        }
        Command::Show { json: true } => {
            let json = serde_json::to_string_pretty(&storefront.view())
                .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
            return Ok(Outcome::Continue(json));
        }
        Command::Show { json: false } => {}
        Command::Quit => return Ok(Outcome::Quit),
    }

    Ok(Outcome::Continue(render(storefront)))
}

fn drag(storefront: &Storefront, path: &[f64], cancel: bool) {
    let viewport = storefront.viewport();
    storefront.slider().pointer_down(viewport);

    let (moves, release) = if cancel {
        (path, None)
    } else {
        match path.split_last() {
            Some((last, moves)) => (moves, Some(*last)),
            None => (path, None),
        }
    };

    for &fraction in moves {
        viewport.dispatch(PointerEvent::Move { fraction });
    }
    match release {
        Some(fraction) => viewport.dispatch(PointerEvent::Up { fraction }),
        None => viewport.dispatch(PointerEvent::Cancel),
    };
}

/// Plain-text state dump.
pub fn render(storefront: &Storefront) -> String {
    let view = storefront.view();
    let slide = storefront.carousel().current();
    let arrows = view.carousel_arrows;
    let category = if view.category.is_empty() { "All" } else { view.category.as_str() };

    let mut out = String::new();
    out.push_str(&format!(
        "carousel  {}{} {}{} [{}/{}]\n",
        if arrows.left { "< " } else { "  " },
        slide.name,
        slide.price,
        if arrows.right { " >" } else { "" },
        storefront.carousel().index() + 1,
        storefront.carousel().slides().len(),
    ));
    out.push_str(&format!("ribbon    {category}\n"));
    out.push_str(&format!(
        "slider    {}/{}{}\n",
        view.slider.value,
        view.slider.steps - 1,
        if view.slider.dragging { " (dragging)" } else { "" }
    ));
    out.push_str(&format!(
        "filters   nuts:{} veg:{}\n",
        if view.no_nuts { "on" } else { "off" },
        if view.vegetarian_only { "on" } else { "off" }
    ));
    out.push_str(&format!(
        "products  {} shown: {}\n",
        view.products.len(),
        view.products.join(", ")
    ));
    out.push_str(&format!("cart      {}", view.cart_icon));

    let checkout = &view.checkout;
    if let Some(title) = checkout.title() {
        out.push_str(&format!("\ncheckout  {title}"));
        for line in &checkout.lines {
            out.push_str(&format!("\n  {} ×{}  {}", line.name, line.count, line.price));
        }
        if let Some(message) = checkout.message {
            out.push_str(&format!("\n  {message}"));
        } else {
            out.push_str(&format!("\n  total {}", checkout.total));
        }
        if checkout.submitting {
            out.push_str("\n  (submitting)");
        }
        if let Some(error) = &checkout.last_error {
            out.push_str(&format!("\n  last attempt failed: {error}"));
        }
    }
    out
}
