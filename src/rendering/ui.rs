//! # User Interface Elements
//!
//! Toolkit-independent UI models: the health bar and menu views.

use crate::config;

/// Player hit points as a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthBar {
    pub hp: u32,
    pub max_hp: u32,
}

impl HealthBar {
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self { hp, max_hp }
    }

    /// Filled cells of a bar `width` cells wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::HealthBar;
    ///
    /// assert_eq!(HealthBar::new(150, 300).filled(20), 10);
    /// assert_eq!(HealthBar::new(0, 300).filled(20), 0);
    /// ```
    pub fn filled(&self, width: u32) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (u64::from(self.hp.min(self.max_hp)) * u64::from(width) / u64::from(self.max_hp)) as u32
    }

    pub fn label(&self) -> String {
        format!("HP: {}/{}", self.hp, self.max_hp)
    }
}

/// A menu as the presentation draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub options: Vec<String>,
    pub selection: usize,
    /// Shown instead of the options when there are none
    pub empty_text: Option<String>,
}

impl MenuView {
    pub fn new(title: &str, options: Vec<String>, selection: usize) -> Self {
        Self {
            title: title.to_string(),
            options,
            selection,
            empty_text: None,
        }
    }

    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = Some(text.to_string());
        self
    }

    /// The page of options containing the selection, with the index of its
    /// first entry.
    pub fn page(&self) -> (usize, &[String]) {
        let per_page = config::ITEMS_PER_PAGE;
        let start = (self.selection / per_page) * per_page;
        let end = (start + per_page).min(self.options.len());
        (start, self.options.get(start..end).unwrap_or(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bar_clamps() {
        let bar = HealthBar::new(400, 300);
        assert_eq!(bar.filled(30), 30);
        assert_eq!(HealthBar::new(5, 0).filled(30), 0);
        assert_eq!(HealthBar::new(100, 300).label(), "HP: 100/300");
    }

    #[test]
    fn test_menu_paging() {
        let options: Vec<String> = (0..20).map(|i| format!("Item {}", i)).collect();
        let menu = MenuView::new("Inventory", options, 17);
        let (start, page) = menu.page();
        assert_eq!(start, config::ITEMS_PER_PAGE);
        assert_eq!(page.len(), 20 - config::ITEMS_PER_PAGE);
        assert_eq!(page[17 - start], "Item 17");

        let empty = MenuView::new("Inventory", Vec::new(), 0).with_empty_text("Nothing");
        assert_eq!(empty.page().1.len(), 0);
    }
}
