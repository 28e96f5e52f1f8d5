//! Flow tests driven through a recording page and an in-memory directory.

mod feed_flow;
mod submit_flow;
mod support;
