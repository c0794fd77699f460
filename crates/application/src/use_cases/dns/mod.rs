pub mod classify;
pub mod codec;
pub mod dispatch_query;
pub mod synthetic_answer;

pub use classify::{is_intercepted, presented_name};
pub use codec::{decode_message, encode_message};
pub use dispatch_query::{DispatchOutcome, DispatchQueryUseCase};
pub use synthetic_answer::synthesize_answer;
