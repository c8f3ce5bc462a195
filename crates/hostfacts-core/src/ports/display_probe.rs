//! Display service port.

use async_trait::async_trait;

use super::DisplayError;

#[async_trait]
pub trait DisplayProbe: Send + Sync {
    /// Pixel width and height of the primary display, or `None` when the
    /// host has no display attached.
    async fn main_display_size(&self) -> Result<Option<(i64, i64)>, DisplayError>;
}
