//! Shell panels around the viewport, rendered from [`ShellView`](crate::presentation::ShellView)

pub mod header;
pub mod legend;
pub mod modal;
