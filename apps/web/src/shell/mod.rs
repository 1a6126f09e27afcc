//! Presentation shell: the two UI events, page rendering, and the HTTP
//! handlers that wire them to the router.

pub mod events;
pub mod handlers;
pub mod page;
