mod loss_fn;
mod mse;
mod sse;

pub use loss_fn::LossFn;
pub use mse::Mse;
pub use sse::Sse;
