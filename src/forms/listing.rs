use serde::Deserialize;
use validator::Validate;

use crate::domain::listing::{Category, Condition, NewListing};

/// Posted by the add-listing form. Tags arrive comma separated, photo
/// URLs one per line.
#[derive(Debug, Deserialize, Validate)]
pub struct AddListingForm {
    #[validate(length(min = 3, max = 120))]
    pub title: String,
    #[validate(length(max = 4000))]
    pub description: String,
    pub category: String,
    pub condition: String,
    #[validate(range(min = 0))]
    pub price: i32,
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub photos: String,
}

impl AddListingForm {
    pub fn to_new_listing(&self, profile_id: i32) -> NewListing {
        NewListing::new(
            profile_id,
            self.title.clone(),
            self.description.clone(),
            Category::from(self.category.as_str()),
            Condition::from(self.condition.as_str()),
            self.price,
            self.location.clone(),
            self.photos.lines().map(str::to_string).collect(),
            self.tags.split(',').map(str::to_string).collect(),
        )
    }
}
