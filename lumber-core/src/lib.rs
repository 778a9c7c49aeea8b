pub mod config;
pub mod error;
pub mod field;
pub mod logger;
pub mod record;
pub mod sampler;
pub mod scope;
pub mod sink;

pub use config::{LogOutput, LoggingConfig, SamplingConfig};
pub use error::LumberError;
pub use field::{Field, FieldValue};
pub use logger::Logger;
pub use record::{Level, Record};
pub use scope::RequestScope;
pub use sink::{BufferedSink, CaptureSink, JsonLineSink, Sink};
