mod resolver;

pub use resolver::{EffectivePrice, effective_price, format_price, resolve};
