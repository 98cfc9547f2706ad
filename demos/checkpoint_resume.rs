//! Checkpoint and Resume
//!
//! This example stops an order pipeline halfway, saves a checkpoint and
//! resumes it on a fresh host.
//!
//! Key concepts:
//! - JSON checkpoints for readability, bincode for compactness
//! - Configuration and history travel with the checkpoint
//! - The shared specification is reused, never serialized
//!
//! Run with: cargo run --example checkpoint_resume

use std::error::Error;
use std::sync::Arc;
use stateflow::checkpoint::Checkpoint;
use stateflow::{HookResult, HostBinding, Machine, MachineConfig, SpecificationBuilder, StateCell};

#[derive(Debug, Default)]
struct Order {
    id: u32,
    state: StateCell,
}

impl HostBinding for Order {
    fn load_state(&self) -> Option<String> {
        self.state.get().map(str::to_owned)
    }

    fn store_state(&mut self, state: &str) -> HookResult {
        println!("  [Order {}] -> {}", self.id, state);
        self.state.set(state);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Checkpoint and Resume ===\n");

    let spec = Arc::new(
        SpecificationBuilder::<Order>::new()
            .state("placed", |s| s.event("pay", "paid"))
            .state("paid", |s| s.event("pack", "packed"))
            .state("packed", |s| s.event("ship", "shipped"))
            .state("shipped", |s| s.event("deliver", "delivered"))
            .states(["delivered"])
            .build()?,
    );

    let config = MachineConfig::default().history_limit(10);
    let order = Order {
        id: 7,
        ..Default::default()
    };
    let mut machine = Machine::with_config(Arc::clone(&spec), order, config);

    println!("Phase 1: processing until interruption");
    machine.fire("pay", &())?;
    machine.fire("pack", &())?;

    let json = machine.checkpoint().to_json()?;
    let bytes = machine.checkpoint().to_bytes()?;
    println!(
        "\n  [Checkpoint] {} bytes as JSON, {} bytes as bincode",
        json.len(),
        bytes.len()
    );
    drop(machine);

    println!("\nPhase 2: resuming from the JSON checkpoint");
    let checkpoint = Checkpoint::from_json(&json)?;
    let order = Order {
        id: 7,
        ..Default::default()
    };
    let mut resumed = Machine::resume(spec, order, checkpoint)?;
    println!("  Resumed in state: {}", resumed.current_state());
    println!("  History limit: {:?}", resumed.config().history_limit);

    resumed.fire("ship", &())?;
    resumed.fire("deliver", &())?;

    println!("\nFull path: {}", resumed.history().get_path().join(" -> "));
    println!("Terminal: {}", resumed.current_state().is_terminal());

    println!("\n=== Example Complete ===");
    Ok(())
}
