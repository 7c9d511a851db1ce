/// Command-line interface and batch driver
pub mod cli;
/// Constants and runtime generation options
pub mod configuration;
/// Error type and constructors
pub mod error;
/// PNG preview export
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Grid text file reading and writing
pub mod text;
