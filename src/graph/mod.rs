//! Conversation graph pieces
//!
//! The state passed between graph nodes and the Firebase agent node.

pub mod node;
pub mod state;

pub use node::FirebaseNode;
pub use state::{ConversationState, Message, Role, Signal};
