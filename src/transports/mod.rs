//! Transport plumbing for talking to an upstream node.
//!
//! Production transports (HTTP, IPC) live with the process wiring outside
//! this crate; anything implementing [`crate::Transport`] plugs in. The
//! scripted transport below backs the crate's own tests.

pub mod test;
pub use self::test::TestTransport;
