//! Secret door and trapdoor structures.
//!
//! A structure is captured from the live world, opened by clearing its
//! concealing blocks and mounted fixtures, and closed by writing every
//! captured cell back exactly as it was.

pub mod helper;

mod config;
mod dispatcher;
mod door;
mod openable;
mod registry;
mod trapdoor;

pub use config::DispatchConfig;
pub use dispatcher::{
    Action, Interaction, InteractionDispatcher, NativeHandling, Outcome, OutcomeAction,
};
pub use door::SecretDoor;
pub use openable::{BlockSnapshot, OpenableKind, Orientation, SecretOpenable};
pub use registry::OpenRegistry;
pub use trapdoor::SecretTrapdoor;
