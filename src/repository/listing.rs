use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::listing::{Listing, ListerSummary, NewListing};
use crate::repository::{
    DieselRepository, ListingReader, ListingSearchQuery, ListingWriter,
    errors::{RepositoryError, RepositoryResult},
};
use crate::search::SortMode;

/// Joins photo URLs, tags and the lister summary onto listing rows,
/// preserving the row order of `rows`.
pub(crate) fn hydrate_listings(
    conn: &mut DbConnection,
    rows: Vec<(crate::models::listing::Listing, (String, Option<String>))>,
) -> RepositoryResult<Vec<Listing>> {
    use crate::models::listing::{Listing as DbListing, ListingPhoto, ListingTag};
    use crate::schema::{listing_photos, listing_tags};

    let db_listings: Vec<DbListing> = rows.iter().map(|(listing, _)| listing.clone()).collect();

    let photos = ListingPhoto::belonging_to(&db_listings)
        .order(listing_photos::position.asc())
        .load::<ListingPhoto>(conn)?
        .grouped_by(&db_listings);

    let tags = ListingTag::belonging_to(&db_listings)
        .order(listing_tags::tag.asc())
        .load::<ListingTag>(conn)?
        .grouped_by(&db_listings);

    Ok(rows
        .into_iter()
        .zip(photos)
        .zip(tags)
        .map(|(((listing, (name, avatar_url)), photos), tags)| {
            listing.into_domain(
                photos.into_iter().map(|p| p.url).collect(),
                tags.into_iter().map(|t| t.tag).collect(),
                ListerSummary { name, avatar_url },
            )
        })
        .collect())
}

impl ListingReader for DieselRepository {
    fn get_listing_by_id(&self, id: i32) -> RepositoryResult<Option<Listing>> {
        use crate::models::listing::Listing as DbListing;
        use crate::schema::{listings, profiles};

        let mut conn = self.conn()?;
        let row = listings::table
            .inner_join(profiles::table)
            .filter(listings::id.eq(id))
            .select((
                listings::all_columns,
                (profiles::name, profiles::avatar_url),
            ))
            .first::<(DbListing, (String, Option<String>))>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_listings(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn search_listings(&self, query: ListingSearchQuery) -> RepositoryResult<(usize, Vec<Listing>)> {
        use crate::models::listing::Listing as DbListing;
        use crate::schema::{listings, profiles};

        let mut conn = self.conn()?;
        let pattern = format!("%{}%", query.text);

        let mut rows = listings::table.inner_join(profiles::table).into_boxed();
        let mut count = listings::table.into_boxed();

        if !query.text.is_empty() {
            rows = rows.filter(listings::title.like(pattern.clone()));
            count = count.filter(listings::title.like(pattern.clone()));
        }
        if !query.categories.is_empty() {
            let categories: Vec<&'static str> =
                query.categories.iter().map(|c| c.as_str()).collect();
            rows = rows.filter(listings::category.eq_any(categories.clone()));
            count = count.filter(listings::category.eq_any(categories));
        }
        if !query.conditions.is_empty() {
            let conditions: Vec<&'static str> =
                query.conditions.iter().map(|c| c.as_str()).collect();
            rows = rows.filter(listings::condition.eq_any(conditions.clone()));
            count = count.filter(listings::condition.eq_any(conditions));
        }
        if !query.price.is_unbounded() {
            rows = rows.filter(listings::price.between(query.price.lower(), query.price.upper()));
            count =
                count.filter(listings::price.between(query.price.lower(), query.price.upper()));
        }

        rows = match query.sort {
            SortMode::Newest => rows.order(listings::created_at.desc()),
            SortMode::Oldest => rows.order(listings::created_at.asc()),
            // Titles matching at the start rank first, recency breaks ties.
            SortMode::Relevance => {
                let prefix = format!("{}%", query.text);
                rows.order(listings::title.like(prefix).desc())
                    .then_order_by(listings::created_at.desc())
            }
        };

        if let Some((start, end)) = query.range {
            rows = rows
                .limit((end - start + 1) as i64)
                .offset(start as i64);
        }

        let page = rows
            .select((
                listings::all_columns,
                (profiles::name, profiles::avatar_url),
            ))
            .load::<(DbListing, (String, Option<String>))>(&mut conn)?;

        let total: i64 = count.count().get_result(&mut conn)?;

        let items = hydrate_listings(&mut conn, page)?;
        Ok((total as usize, items))
    }

    fn suggest_titles(&self, partial: &str, limit: usize) -> RepositoryResult<Vec<String>> {
        use crate::schema::listings;

        let mut conn = self.conn()?;
        let partial = partial.trim();
        if partial.is_empty() {
            return Ok(vec![]);
        }

        let titles = listings::table
            .filter(listings::title.like(format!("%{partial}%")))
            .order(listings::title.like(format!("{partial}%")).desc())
            .then_order_by(listings::created_at.desc())
            .select(listings::title)
            .limit(limit as i64)
            .load::<String>(&mut conn)?;

        // Drop duplicate titles while keeping the ranked order.
        let mut seen = std::collections::HashSet::new();
        Ok(titles
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect())
    }

    fn list_recent_listings(&self, limit: usize) -> RepositoryResult<Vec<Listing>> {
        use crate::models::listing::Listing as DbListing;
        use crate::schema::{listings, profiles};

        let mut conn = self.conn()?;
        let rows = listings::table
            .inner_join(profiles::table)
            .order(listings::created_at.desc())
            .limit(limit as i64)
            .select((
                listings::all_columns,
                (profiles::name, profiles::avatar_url),
            ))
            .load::<(DbListing, (String, Option<String>))>(&mut conn)?;

        hydrate_listings(&mut conn, rows)
    }
}

impl ListingWriter for DieselRepository {
    fn create_listing(&self, new_listing: &NewListing) -> RepositoryResult<Listing> {
        use crate::models::listing::{
            Listing as DbListing, ListingPhoto, ListingTag, NewListing as DbNewListing,
        };
        use crate::schema::{listing_photos, listing_tags, listings, profiles};

        let mut conn = self.conn()?;

        conn.transaction::<Listing, RepositoryError, _>(|conn| {
            let insertable: DbNewListing = new_listing.into();
            let row: DbListing = diesel::insert_into(listings::table)
                .values(&insertable)
                .get_result(conn)?;

            let photos: Vec<ListingPhoto> = new_listing
                .photos
                .iter()
                .enumerate()
                .map(|(position, url)| ListingPhoto {
                    listing_id: row.id,
                    position: position as i32,
                    url: url.clone(),
                })
                .collect();
            diesel::insert_into(listing_photos::table)
                .values(&photos)
                .execute(conn)?;

            let tags: Vec<ListingTag> = new_listing
                .tags
                .iter()
                .map(|tag| ListingTag {
                    listing_id: row.id,
                    tag: tag.clone(),
                })
                .collect();
            diesel::insert_into(listing_tags::table)
                .values(&tags)
                .execute(conn)?;

            let (name, avatar_url): (String, Option<String>) = profiles::table
                .find(row.profile_id)
                .select((profiles::name, profiles::avatar_url))
                .first(conn)?;

            Ok(row.into_domain(
                new_listing.photos.clone(),
                new_listing.tags.clone(),
                ListerSummary { name, avatar_url },
            ))
        })
    }

    fn delete_listing(&self, listing_id: i32) -> RepositoryResult<()> {
        use crate::schema::{listing_photos, listing_tags, listings, saved_items};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(saved_items::table.filter(saved_items::listing_id.eq(listing_id)))
                .execute(conn)?;
            diesel::delete(
                listing_photos::table.filter(listing_photos::listing_id.eq(listing_id)),
            )
            .execute(conn)?;
            diesel::delete(listing_tags::table.filter(listing_tags::listing_id.eq(listing_id)))
                .execute(conn)?;
            diesel::delete(listings::table.find(listing_id)).execute(conn)?;
            Ok(())
        })
    }
}
