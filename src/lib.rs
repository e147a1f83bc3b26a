//! # Keiro - Campaign Sequence Graph Engine
//!
//! **Keiro** models outreach campaigns as directed graphs of steps. Action
//! steps (emails, LinkedIn messages, manual tasks) run one after another, and
//! condition steps split the flow into a `yes` and a `no` branch. The engine
//! keeps the graph consistent, derives which template variables each step
//! uses, lays the graph out deterministically for display, and converts it to
//! and from the flat parent-pointer records that are actually stored.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse stored steps with [`flat::from_json`], or convert your own
//!     records by implementing [`flat::IntoSequence`]. Malformed input never
//!     fails the import; it comes back as warnings next to the graph.
//! 2.  **Edit**: Mutate the [`sequence::SequenceGraph`] directly, or through an
//!     [`editor::EditSession`] that also tracks zoom, pan and dragging.
//!     Structural edits that would break the graph are rejected and leave it
//!     untouched.
//! 3.  **Lay out**: [`layout::LayoutEngine`] assigns coordinates from topology
//!     alone, so the same graph always gets the same picture.
//! 4.  **Save**: [`flat::to_flat`] / [`flat::to_json`] produce the persisted form.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = SequenceBuilder::new()
//!         .step("intro", ActionType::Email, None)
//!         .text("intro", TemplateField::Message, "Hi {{firstName}}")
//!         .step("opened", ConditionType::EmailOpened, Some(("intro", Branch::Main)))
//!         .step("call", ActionType::ManualTask, Some(("opened", Branch::Yes)))
//!         .text("call", TemplateField::TaskTitle, "Call {{name}}")
//!         .step("nudge", ActionType::Email, Some(("opened", Branch::No)))
//!         .build_laid_out()?;
//!
//!     // Aliases are normalized to the canonical keys.
//!     let intro = graph.node("intro").ok_or("missing intro")?;
//!     assert!(intro.variables().contains(&VariableKey::FirstName));
//!
//!     // Store it, then load it back.
//!     let json = to_json(&graph)?;
//!     let loaded = from_json(&json, &ImportOptions::default())?;
//!     assert!(loaded.is_clean());
//!     assert_eq!(loaded.graph.len(), 4);
//!
//!     println!("{}", OutlineFormatter::format(&loaded.graph));
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod editor;
pub mod error;
pub mod flat;
pub mod layout;
pub mod outline;
pub mod prelude;
pub mod sequence;
pub mod template;
