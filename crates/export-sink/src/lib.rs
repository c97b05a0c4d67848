pub mod errors;
pub mod preview;
pub mod sink;
pub mod stl;

pub use errors::ExportError;
pub use preview::{JsonSceneSink, PreviewItem, PreviewRole, PreviewScene, PreviewSink};
pub use sink::{ExportSink, MemorySink, StlFileSink};
pub use stl::{encode_stl, write_ascii_stl, write_binary_stl, StlFormat};
