//! Error types for the maze core.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! `Result` is a typedef of std `Result` with our own `Error` and the `From` conversions
//! let `?` work for the linked error types.

use error_chain::error_chain;
pub use error_chain::bail;

use crate::grid::CellLinkError;

error_chain! {

    foreign_links {
        CellLink(CellLinkError);
    }

    errors {
        OutOfBounds(x: i64, y: i64, width: usize, height: usize) {
            description("coordinate outside the maze")
            display("coordinate ({}, {}) is outside the {}x{} maze", x, y, width, height)
        }

        NotInitialized {
            description("maze queried before it was created")
            display("no maze has been created yet")
        }

        InvalidDimensions(width: i64, height: i64) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}", width, height)
        }

        InvalidBraidFactor(factor: f64) {
            description("braid factor outside 0.0..=1.0")
            display("braid factor {} is outside 0.0..=1.0", factor)
        }

        UnknownAlgorithm(name: String) {
            description("unknown maze generation algorithm")
            display("unknown maze generation algorithm '{}'", name)
        }

        GenerationAborted {
            description("maze generation worker stopped unexpectedly")
            display("maze generation worker stopped unexpectedly")
        }
    }
}
