// Application layer - Use case interactors

pub mod container;
pub mod progress_ticker;
pub mod retrieve_interactor;

// Re-export interactors
pub use progress_ticker::{ProgressTicker, TickerHandle};
pub use retrieve_interactor::RetrieveInteractor;
