/// Vertical viewport over a list of rows.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub max_visible: Option<usize>,
}

impl ScrollState {
    pub fn new(max_visible: Option<usize>) -> Self {
        Self {
            offset: 0,
            max_visible,
        }
    }

    pub fn set_max_visible(&mut self, max: usize, active: usize, total: usize) {
        self.max_visible = Some(max.max(1));
        self.ensure_visible(active, total);
    }

    pub fn ensure_visible(&mut self, active: usize, total: usize) {
        let Some(max) = self.max_visible else {
            return;
        };
        if total <= max {
            self.offset = 0;
            return;
        }
        let last = self.offset.saturating_add(max).saturating_sub(1);
        if active < self.offset {
            self.offset = active;
        } else if active > last {
            self.offset = active + 1 - max;
        }
        self.offset = self.offset.min(total - max);
    }

    pub fn clamp_active(active: &mut usize, total: usize) {
        if total == 0 {
            *active = 0;
        } else if *active >= total {
            *active = total - 1;
        }
    }

    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        match self.max_visible {
            Some(limit) => {
                let start = self.offset.min(total);
                let end = (start + limit).min(total);
                (start, end)
            }
            None => (0, total),
        }
    }

    /// `[3-12 of 40] ↑↓` when the rows do not fit.
    pub fn footer(&self, total: usize) -> Option<String> {
        let max = self.max_visible?;
        if total <= max {
            return None;
        }
        let (start, end) = self.visible_range(total);
        let arrow = match (start > 0, end < total) {
            (true, true) => " ↑↓",
            (true, false) => " ↑",
            (false, true) => " ↓",
            (false, false) => "",
        };
        Some(format!("[{}-{} of {}]{}", start + 1, end, total, arrow))
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollState;

    #[test]
    fn keeps_active_row_in_view() {
        let mut scroll = ScrollState::new(Some(3));
        scroll.ensure_visible(5, 10);
        assert_eq!(scroll.visible_range(10), (3, 6));
        scroll.ensure_visible(1, 10);
        assert_eq!(scroll.visible_range(10), (1, 4));
        scroll.ensure_visible(0, 2);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn footer_only_when_overflowing() {
        let mut scroll = ScrollState::new(Some(3));
        assert_eq!(scroll.footer(3), None);
        scroll.ensure_visible(4, 10);
        assert_eq!(scroll.footer(10).as_deref(), Some("[3-5 of 10] ↑↓"));
    }

    #[test]
    fn shrinking_list_pulls_offset_back() {
        let mut scroll = ScrollState::new(Some(3));
        scroll.ensure_visible(9, 10);
        assert_eq!(scroll.offset, 7);
        let mut active = 9;
        ScrollState::clamp_active(&mut active, 5);
        scroll.ensure_visible(active, 5);
        assert_eq!((active, scroll.offset), (4, 2));
    }
}
