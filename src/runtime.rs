//! Session runtime: context construction and the interactive loop.
//!
//! The context is built in a fixed order (event bus, then models, then the
//! orchestrator) and the view's input half, the command loop here, starts
//! last. All dispatch is synchronous; the two network operations are the
//! only suspension points, and both are performed between turns: the
//! orchestrator queues an [`ApiCommand`], the session awaits it, and the
//! outcome re-enters the system as an event.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::BufRead;
use std::rc::Rc;

use crate::api::ShopApi;
use crate::bus::{AppEvent, EventBus, TopicFilter};
use crate::checkout::{ApiCommand, Checkout, CommandQueue};
use crate::model::{Basket, Buyer, Catalog, Payment};
use crate::view::ViewPort;

/// Everything a running session shares: the bus, the three models, the
/// orchestrator and the command queue.
pub struct ShopContext {
    pub events: Rc<EventBus>,
    pub catalog: Rc<RefCell<Catalog>>,
    pub basket: Rc<RefCell<Basket>>,
    pub buyer: Rc<RefCell<Buyer>>,
    pub checkout: Checkout,
    pub commands: CommandQueue,
}

/// Build the shared context around an existing view.
pub fn build_context(view: Rc<RefCell<dyn ViewPort>>) -> ShopContext {
    let events = Rc::new(EventBus::new());

    // Wildcard subscriber: every emission, with its literal name, into the log.
    events.subscribe(
        TopicFilter::Any,
        Rc::new(|event: &AppEvent| {
            tracing::debug!(topic = event.topic().as_str(), "event");
        }),
    );

    let catalog = Rc::new(RefCell::new(Catalog::new(Rc::clone(&events))));
    let basket = Rc::new(RefCell::new(Basket::new(Rc::clone(&events))));
    let buyer = Rc::new(RefCell::new(Buyer::new(Rc::clone(&events))));
    let commands: CommandQueue = Rc::new(RefCell::new(VecDeque::new()));

    let checkout = Checkout::new(
        Rc::clone(&events),
        Rc::clone(&catalog),
        Rc::clone(&basket),
        Rc::clone(&buyer),
        view,
        Rc::clone(&commands),
    );

    ShopContext {
        events,
        catalog,
        basket,
        buyer,
        checkout,
        commands,
    }
}

/// One interactive storefront session over a [`ShopApi`].
pub struct Session<A: ShopApi> {
    ctx: ShopContext,
    api: A,
}

impl<A: ShopApi> Session<A> {
    pub fn new(api: A, view: Rc<RefCell<dyn ViewPort>>) -> Self {
        Self {
            ctx: build_context(view),
            api,
        }
    }

    pub fn context(&self) -> &ShopContext {
        &self.ctx
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the catalog and render the initial gallery.
    pub async fn bootstrap(&self) {
        self.ctx
            .commands
            .borrow_mut()
            .push_back(ApiCommand::FetchCatalog);
        self.drain().await;
    }

    /// Emit one event, then perform whatever network work it queued.
    pub async fn emit(&self, event: AppEvent) {
        self.ctx.events.emit(event);
        self.drain().await;
    }

    /// Await queued API commands, re-emitting each outcome as an event.
    pub async fn drain(&self) {
        loop {
            let command = self.ctx.commands.borrow_mut().pop_front();
            let Some(command) = command else { break };
            match command {
                ApiCommand::FetchCatalog => match self.api.fetch_catalog().await {
                    Ok(page) => {
                        self.ctx
                            .events
                            .emit(AppEvent::CatalogLoaded { items: page.items });
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "catalog fetch failed");
                        self.ctx.events.emit(AppEvent::Error {
                            message: err.user_message(),
                        });
                    }
                },
                ApiCommand::SubmitOrder(payload) => match self.api.submit_order(&payload).await {
                    Ok(receipt) => {
                        self.ctx.events.emit(AppEvent::OrderConfirmed { receipt });
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "order submission failed");
                        self.ctx.events.emit(AppEvent::OrderFailed {
                            message: err.user_message(),
                        });
                    }
                },
            }
        }
    }

    /// Drive the session from line-based input until `quit` or EOF.
    pub async fn run(&self, input: impl BufRead) {
        print_help();
        for line in input.lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(Input::Event(event)) => self.emit(event).await,
                Some(Input::SubmitOrder) => {
                    let info = self.ctx.buyer.borrow().snapshot();
                    self.emit(AppEvent::OrderSubmit {
                        payment: info.payment,
                        address: info.address,
                    })
                    .await;
                }
                Some(Input::SubmitContacts) => {
                    let info = self.ctx.buyer.borrow().snapshot();
                    self.emit(AppEvent::ContactsSubmit {
                        email: info.email,
                        phone: info.phone,
                    })
                    .await;
                }
                Some(Input::Help) => print_help(),
                Some(Input::Quit) => break,
                None => println!("unknown command, type `help`"),
            }
        }
    }
}

/// A parsed console command.
#[derive(Debug)]
enum Input {
    /// Forward an event onto the bus.
    Event(AppEvent),
    /// Submit the order form with the buyer's current payment/address.
    SubmitOrder,
    /// Submit the contact form with the buyer's current email/phone.
    SubmitContacts,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    let input = match (cmd, rest) {
        ("list", _) => Input::Event(AppEvent::CatalogChanged),
        ("show", id) if !id.is_empty() => Input::Event(AppEvent::ProductSelect {
            id: id.to_string(),
        }),
        ("add", id) if !id.is_empty() => Input::Event(AppEvent::ProductAdd { id: id.to_string() }),
        ("remove", id) if !id.is_empty() => Input::Event(AppEvent::ProductRemove {
            id: id.to_string(),
        }),
        ("basket", _) => Input::Event(AppEvent::BasketOpen),
        ("checkout", _) => Input::Event(AppEvent::OrderStart),
        ("pay", "card") => Input::Event(AppEvent::OrderPaymentChange {
            payment: Payment::Card,
        }),
        ("pay", "cash") => Input::Event(AppEvent::OrderPaymentChange {
            payment: Payment::Cash,
        }),
        ("address", value) if !value.is_empty() => Input::Event(AppEvent::OrderAddressChange {
            address: value.to_string(),
        }),
        ("submit", _) => Input::SubmitOrder,
        ("email", value) if !value.is_empty() => Input::Event(AppEvent::ContactsEmailChange {
            email: value.to_string(),
        }),
        ("phone", value) if !value.is_empty() => Input::Event(AppEvent::ContactsPhoneChange {
            phone: value.to_string(),
        }),
        ("confirm", _) => Input::SubmitContacts,
        ("close", _) => Input::Event(AppEvent::ModalClose),
        ("help", _) => Input::Help,
        ("quit" | "exit", _) => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn print_help() {
    println!("commands:");
    println!("  list                 show the catalog");
    println!("  show <id>            preview a product");
    println!("  add <id>             add a product to the basket");
    println!("  remove <id>          remove a product from the basket");
    println!("  basket               open the basket");
    println!("  checkout             start checkout");
    println!("  pay <card|cash>      choose a payment method");
    println!("  address <text>       set the shipping address");
    println!("  submit               submit payment and address");
    println!("  email <text>         set the email");
    println!("  phone <text>         set the phone number");
    println!("  confirm              place the order");
    println!("  close                close the open screen");
    println!("  quit                 leave");
}
