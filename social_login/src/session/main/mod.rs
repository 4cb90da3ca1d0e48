mod cookie;
mod store;

pub use store::SessionStore;
