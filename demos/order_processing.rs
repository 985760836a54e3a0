//! E-commerce Order Processing
//!
//! This example demonstrates an order lifecycle with payment processing.
//!
//! Key concepts:
//! - E-commerce order states (Draft -> Paid -> Shipped -> Delivered)
//! - Business validation in before hooks
//! - Side effects in enter hooks, with rollback on failure
//! - Audit notes recorded per hop
//!
//! Run with: cargo run --example order_processing

use hookfsm::builder::StateMachineBuilder;
use hookfsm::core::{AuditLog, Stateful, Status, StatusCode};
use hookfsm::status_enum;
use hookfsm::HookError;
use std::sync::Arc;

status_enum! {
    enum OrderState {
        Draft = 1,
        Paid = 2,
        Shipped = 3,
        Delivered = 4,
    }
}

#[derive(Debug, thiserror::Error)]
enum OrderError {
    #[error("order {0} is empty")]
    Empty(u64),

    #[error("order {0} has no shipping address")]
    MissingAddress(u64),
}

// Order entity
struct Order {
    id: u64,
    total: f64,
    items: Vec<String>,
    shipping_address: Option<String>,
    notifications: Vec<String>,
    status: Status,
}

impl Stateful for Order {
    fn status(&self) -> StatusCode {
        self.status.status()
    }

    fn set_status(&mut self, code: StatusCode) {
        self.status.set_status(code)
    }

    fn status_name(&self) -> String {
        OrderState::display_name(self.status.state)
    }
}

// Guards
fn can_pay(order: &mut Order) -> Result<(), HookError> {
    if order.total > 0.0 && !order.items.is_empty() {
        Ok(())
    } else {
        Err(OrderError::Empty(order.id).into())
    }
}

fn can_ship(order: &mut Order) -> Result<(), HookError> {
    match order.shipping_address {
        Some(_) => Ok(()),
        None => Err(OrderError::MissingAddress(order.id).into()),
    }
}

// Side effects
fn notify(
    message: &'static str,
) -> impl Fn(&mut Order) -> Result<(), HookError> + Send + Sync + 'static {
    move |order: &mut Order| -> Result<(), HookError> {
        let notification = format!("Order {}: {}", order.id, message);
        println!("  [Notification] {}", notification);
        order.notifications.push(notification);
        Ok(())
    }
}

fn main() {
    println!("=== E-commerce Order Processing ===\n");

    let audit = Arc::new(AuditLog::new());

    let mut builder = StateMachineBuilder::<Order>::new()
        .initial(OrderState::Draft)
        .audit(audit.clone());
    builder.state(OrderState::Draft);
    builder.state(OrderState::Paid).enter(notify("payment processed"));
    builder.state(OrderState::Shipped).enter(notify("order shipped"));
    builder
        .state(OrderState::Delivered)
        .enter(notify("order delivered"));
    builder
        .event("pay")
        .to(OrderState::Paid)
        .from([OrderState::Draft])
        .before(can_pay);
    builder
        .event("ship")
        .to(OrderState::Shipped)
        .from([OrderState::Paid])
        .before(can_ship);
    builder
        .event("deliver")
        .to(OrderState::Delivered)
        .from([OrderState::Shipped]);
    let machine = builder.build().unwrap();

    println!("Order processing state machine created");
    println!("States: Draft -> Paid -> Shipped -> Delivered\n");

    let mut order = Order {
        id: 12345,
        total: 149.99,
        items: vec!["Book".to_string(), "Pen".to_string()],
        shipping_address: None,
        notifications: vec![],
        status: Status::default(),
    };

    println!("Processing order {}:", order.id);
    println!("  Total: ${:.2}", order.total);
    println!("  Items: {}", order.items.join(", "));
    println!();

    println!("Step 1: Process Payment");
    machine.trigger("pay", &mut order, &["card"]).unwrap();
    println!();

    println!("Step 2: Ship Order");
    if let Err(e) = machine.trigger("ship", &mut order, &[]) {
        println!("  Error: {}", e);
        println!("  Order is still {}", order.status_name());
    }
    order.shipping_address = Some("123 Main St, City, State 12345".to_string());
    machine
        .trigger("ship", &mut order, &["carrier: ACME"])
        .unwrap();
    println!();

    println!("Step 3: Complete Delivery");
    machine.trigger("deliver", &mut order, &[]).unwrap();
    println!();

    println!("Order is {}", order.status_name());
    println!("Total notifications sent: {}", order.notifications.len());
    println!("Audited hops: {}", audit.len());
    for entry in audit.entries() {
        println!(
            "  {} -> {} via [{}] {:?}",
            OrderState::display_name(entry.from),
            OrderState::display_name(entry.to),
            entry.event,
            entry.notes
        );
    }

    println!("\n=== Example Complete ===");
}
