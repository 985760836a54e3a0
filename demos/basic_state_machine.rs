//! Basic State Machine
//!
//! This example drives a connection through a chain of statuses.
//!
//! Key concepts:
//! - Declaring statuses with the status_enum macro
//! - Single-hop triggers versus chained triggers
//! - Graph mismatches reported as errors
//!
//! Run with: cargo run --example basic_state_machine

use hookfsm::builder::StateMachineBuilder;
use hookfsm::core::{Stateful, StatusCode};
use hookfsm::status_enum;

status_enum! {
    enum ConnectionState {
        Disconnected = 1,
        Connecting = 2,
        Connected = 3,
    }
}

struct Connection {
    peer: String,
    status: StatusCode,
}

impl Stateful for Connection {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn set_status(&mut self, code: StatusCode) {
        self.status = code;
    }

    fn status_name(&self) -> String {
        ConnectionState::display_name(self.status)
    }
}

fn main() {
    println!("=== Basic State Machine Example ===\n");

    let mut builder =
        StateMachineBuilder::<Connection>::new().initial(ConnectionState::Disconnected);
    builder.states(ConnectionState::ALL.iter().copied());
    {
        let mut connect = builder.event("connect");
        connect
            .to(ConnectionState::Connecting)
            .from([ConnectionState::Disconnected])
            .continuable();
        connect
            .to(ConnectionState::Connected)
            .from([ConnectionState::Connecting]);
    }
    builder
        .event("drop")
        .to(ConnectionState::Disconnected)
        .from([ConnectionState::Connecting, ConnectionState::Connected]);
    let machine = builder.build().unwrap();

    println!("State machine created successfully!");
    println!("Initial state: {}", ConnectionState::display_name(machine.initial()));

    let mut conn = Connection {
        peer: "10.0.0.7:5432".to_string(),
        status: StatusCode::NIL,
    };

    machine.trigger("connect", &mut conn, &[]).unwrap();
    println!("After one hop, {} is {}", conn.peer, conn.status_name());

    machine.trigger("drop", &mut conn, &[]).unwrap();
    machine.trigger_chained("connect", &mut conn, &[]).unwrap();
    println!("After a chained trigger, {} is {}", conn.peer, conn.status_name());

    if let Err(e) = machine.trigger("connect", &mut conn, &[]) {
        println!("Connecting again fails: {}", e);
    }

    println!("\n=== Example Complete ===");
}
