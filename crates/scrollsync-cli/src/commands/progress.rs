use anyhow::Result;

use scrollsync_core::{scrollable_range, ScrollState};

/// How the scrollable range was given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Range(f64),
    Viewport { content: f64, viewport: f64 },
}

impl Extent {
    fn range(self) -> f64 {
        match self {
            Extent::Range(range) => range,
            Extent::Viewport { content, viewport } => scrollable_range(content, viewport),
        }
    }
}

pub fn snapshot(offset: f64, extent: Extent) -> ScrollState {
    ScrollState::new(offset, extent.range())
}

pub fn run(offset: f64, extent: Extent, json: bool) -> Result<()> {
    let state = snapshot(offset, extent);

    if json {
        println!("{}", state.to_json()?);
        return Ok(());
    }

    println!("Offset:   {}", state.scroll_offset);
    println!("Range:    {}", state.scrollable_range);
    println!("Progress: {:.4} ({}%)", state.progress, state.percent());
    if state.is_unscrollable() {
        println!("\nNothing to scroll: content fits in the viewport.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_range() {
        assert_eq!(snapshot(150.0, Extent::Range(300.0)).progress, 0.5);
        assert_eq!(snapshot(0.0, Extent::Range(0.0)).progress, 0.0);
        assert_eq!(snapshot(300.0, Extent::Range(300.0)).progress, 1.0);
    }

    #[test]
    fn test_snapshot_from_extents() {
        let state = snapshot(
            150.0,
            Extent::Viewport {
                content: 1000.0,
                viewport: 700.0,
            },
        );
        assert_eq!(state.scrollable_range, 300.0);
        assert_eq!(state.progress, 0.5);
    }
}
