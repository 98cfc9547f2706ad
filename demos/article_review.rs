//! Article Review Workflow
//!
//! This example walks an article through a review process.
//!
//! Key concepts:
//! - States declared in order, the first one is initial
//! - Host actions chosen by event name
//! - Halting a transition from an action
//! - Inspecting the current state and its events
//!
//! Run with: cargo run --example article_review

use std::error::Error;
use std::sync::Arc;
use stateflow::{
    HookResult, HostBinding, Machine, SpecificationBuilder, StateCell,
    TransitionContext,
};

#[derive(Debug, Default)]
struct Article {
    title: String,
    reviewer: Option<String>,
    state: StateCell,
}

impl HostBinding<Option<String>> for Article {
    fn load_state(&self) -> Option<String> {
        self.state.get().map(str::to_owned)
    }

    fn store_state(&mut self, state: &str) -> HookResult {
        self.state.set(state);
        Ok(())
    }

    fn run_action(
        &mut self,
        event: &str,
        ctx: &mut TransitionContext<'_, Option<String>>,
    ) -> HookResult {
        if event == "review" {
            match ctx.args() {
                Some(reviewer) => self.reviewer = Some(reviewer.clone()),
                None => ctx.halt_because("a reviewer is required"),
            }
        }
        Ok(())
    }

    fn enter_state(
        &mut self,
        state: &str,
        ctx: &TransitionContext<'_, Option<String>>,
    ) -> HookResult {
        println!("  '{}' entered {} via {}", self.title, state, ctx.event());
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Article Review Workflow ===\n");

    let spec = SpecificationBuilder::<Article, Option<String>>::new()
        .state("new", |s| s.event("submit", "awaiting_review"))
        .state("awaiting_review", |s| s.event("review", "being_reviewed"))
        .state("being_reviewed", |s| {
            s.event("accept", "accepted").event("reject", "rejected")
        })
        .states(["accepted", "rejected"])
        .build()?;

    let article = Article {
        title: "State machines in practice".to_string(),
        ..Default::default()
    };
    let mut machine = Machine::new(Arc::new(spec), article);

    println!("Initial state: {}", machine.current_state());
    println!("Available events: {:?}\n", machine.current_state().event_names());

    machine.fire("submit", &None)?;

    println!("\nReviewing without a reviewer:");
    let outcome = machine.fire("review", &None)?;
    println!(
        "  halted: {} ({})",
        outcome.is_halted(),
        machine.halted_because().unwrap_or("no reason")
    );

    println!("\nReviewing with a reviewer:");
    machine.fire("review", &Some("alice".to_string()))?;
    machine.fire("accept", &None)?;

    println!("\nFinal state: {}", machine.current_state());
    println!("Reviewed by: {:?}", machine.host().reviewer);
    println!("Path: {}", machine.history().get_path().join(" -> "));

    println!("\nRejecting an accepted article:");
    match machine.fire("reject", &None) {
        Err(err) => println!("  {err}"),
        Ok(_) => println!("  unexpectedly accepted"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
