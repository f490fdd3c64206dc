pub mod handler;
pub mod protocol;

// Re-export the handler so the binaries can register it directly.
pub use handler::{function_handler, handle_event};
pub use protocol::InvocationResponse;
