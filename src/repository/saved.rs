use diesel::prelude::*;

use crate::domain::listing::Listing;
use crate::repository::listing::hydrate_listings;
use crate::repository::{
    DieselRepository, Pagination, SavedItemReader, SavedItemWriter, errors::RepositoryResult,
};

impl SavedItemReader for DieselRepository {
    fn list_saved_listings(
        &self,
        profile_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<Listing>)> {
        use crate::models::listing::Listing as DbListing;
        use crate::schema::{listings, profiles, saved_items};

        let mut conn = self.conn()?;

        let mut rows = saved_items::table
            .inner_join(listings::table.inner_join(profiles::table))
            .filter(saved_items::profile_id.eq(profile_id))
            .order(saved_items::created_at.desc())
            .select((
                listings::all_columns,
                (profiles::name, profiles::avatar_url),
            ))
            .into_boxed();

        if let Some(Pagination { page, per_page }) = pagination {
            let page = if page == 0 { 1 } else { page };
            rows = rows
                .limit(per_page as i64)
                .offset(((page - 1) * per_page) as i64);
        }

        let page = rows.load::<(DbListing, (String, Option<String>))>(&mut conn)?;

        let total: i64 = saved_items::table
            .filter(saved_items::profile_id.eq(profile_id))
            .count()
            .get_result(&mut conn)?;

        let items = hydrate_listings(&mut conn, page)?;
        Ok((total as usize, items))
    }

    fn is_listing_saved(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool> {
        use crate::schema::saved_items;

        let mut conn = self.conn()?;
        let found = saved_items::table
            .find((profile_id, listing_id))
            .select(saved_items::listing_id)
            .first::<i32>(&mut conn)
            .optional()?;

        Ok(found.is_some())
    }
}

impl SavedItemWriter for DieselRepository {
    fn save_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool> {
        use crate::schema::saved_items;

        let mut conn = self.conn()?;
        let affected = diesel::insert_or_ignore_into(saved_items::table)
            .values((
                saved_items::profile_id.eq(profile_id),
                saved_items::listing_id.eq(listing_id),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    fn unsave_listing(&self, profile_id: i32, listing_id: i32) -> RepositoryResult<bool> {
        use crate::schema::saved_items;

        let mut conn = self.conn()?;
        let affected = diesel::delete(saved_items::table.find((profile_id, listing_id)))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
