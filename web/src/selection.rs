use shared_types::Restaurant;

/// The one app-wide selected restaurant. Identity is by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection(Option<Restaurant>);

impl Selection {
    /// Selects `restaurant`, or clears the selection when it is already selected.
    pub fn toggle(&mut self, restaurant: Restaurant) {
        let reselected = self
            .0
            .as_ref()
            .is_some_and(|current| current.name == restaurant.name);

        self.0 = if reselected { None } else { Some(restaurant) };
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.0.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_ref().map(|r| r.name.as_str())
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.name() == Some(name)
    }
}
