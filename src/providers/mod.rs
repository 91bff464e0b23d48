//! DDNS provider implementations.

mod namecheap;

#[cfg(test)]
mod tests;

pub use namecheap::NamecheapProvider;
