/// Lines the renderer spends outside the three pane bodies: title, notice,
/// three pane titles, three scroll footers, parse error, key help.
const CHROME_LINES: usize = 10;
const MIN_PANE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneHeights {
    pub fields: usize,
    pub raw: usize,
    pub keys: usize,
}

impl PaneHeights {
    /// Splits the screen 2:2:1 between fields, raw text and visible keys.
    /// Small terminals get the minimum and rely on scrolling to the cursor.
    pub fn for_terminal(height: u16) -> Self {
        let body = usize::from(height).saturating_sub(CHROME_LINES);
        let fields = (body * 2 / 5).max(MIN_PANE);
        let raw = (body * 2 / 5).max(MIN_PANE);
        let keys = body.saturating_sub(fields + raw).max(MIN_PANE);
        Self { fields, raw, keys }
    }
}

#[cfg(test)]
mod tests {
    use super::PaneHeights;

    #[test]
    fn splits_available_rows() {
        assert_eq!(
            PaneHeights::for_terminal(60),
            PaneHeights {
                fields: 20,
                raw: 20,
                keys: 10
            }
        );
    }

    #[test]
    fn tiny_terminal_keeps_minimum() {
        assert_eq!(
            PaneHeights::for_terminal(8),
            PaneHeights {
                fields: 3,
                raw: 3,
                keys: 3
            }
        );
    }
}
