//! Terrain synthesis error types.

/// Errors that can occur during terrain synthesis.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The height matrix holds no sample at all; interpolation has nothing
    /// to work from and a fill would be meaningless.
    #[error("height matrix is empty: no terrain sample to interpolate from")]
    EmptyMatrix,

    /// No filler block configured; interior layers could not be drawn and
    /// every column would come out hollow.
    #[error("filler block list is empty: nothing to fill column interiors with")]
    NoFillerBlocks,
}
