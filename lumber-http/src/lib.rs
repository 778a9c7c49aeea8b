pub mod middleware;
pub mod writer;

pub use middleware::{Handler, HandlerFn, RequestLogger};
pub use writer::{ResponseRecorder, ResponseWriter, StatusWriter};
