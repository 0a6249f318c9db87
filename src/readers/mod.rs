pub mod baseline_reader;
pub mod chunk_scanner;
pub mod measurement_file;
pub mod segmenter;

pub use baseline_reader::{BaselineReader, BaselineStats};
pub use chunk_scanner::ChunkScanner;
pub use measurement_file::MeasurementFile;
pub use segmenter::Segmenter;
