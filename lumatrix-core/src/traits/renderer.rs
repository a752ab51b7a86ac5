//! Renderer trait

use lumatrix_protocol::RenderDirective;

/// Errors from executing a directive against the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Refresh did not complete in time
    Timeout,
    /// Matrix driver fault
    Hardware,
    /// Directive did not fit the render buffers
    BufferOverflow,
}

/// Executes one directive's draw operations in order
pub trait Renderer {
    fn render(&mut self, directive: &RenderDirective) -> Result<(), RenderError>;
}
