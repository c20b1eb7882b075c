pub mod dispatcher;
pub mod error;
pub mod simulated;

pub use dispatcher::{Dispatcher, Submitter};
pub use error::{Result, SubmitError};
pub use simulated::SimulatedSubmitter;

use tokio::runtime::Runtime;

/// Runtime for hosts that are otherwise synchronous.
pub fn build_runtime() -> Result<Runtime> {
    Runtime::new().map_err(|err| SubmitError::Runtime(err.to_string()))
}
