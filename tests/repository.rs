use chrono::{Duration, Utc};
use diesel::prelude::*;
use serde_json::json;

use givehub::domain::activity::{ActivityKind, NewActivityEntry};
use givehub::domain::listing::{Category, Condition, NewListing};
use givehub::domain::profile::{NewProfile, Profile, UpdateProfile};
use givehub::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository, ListingReader,
    ListingSearchQuery, ListingWriter, ProfileReader, ProfileWriter, SavedItemReader,
    SavedItemWriter,
};
use givehub::search::{PriceRange, SortMode};

mod common;

fn create_profile(repo: &DieselRepository, name: &str, email: &str) -> Profile {
    repo.create_or_update_profile(&NewProfile::new(name.to_string(), email.to_string(), None))
        .unwrap()
}

fn new_listing(profile_id: i32, title: &str, category: Category, price: i32) -> NewListing {
    NewListing::new(
        profile_id,
        title.to_string(),
        format!("{title} in fine shape"),
        category,
        Condition::Good,
        price,
        "Springfield".to_string(),
        vec![format!("https://img.example/{title}.jpg")],
        vec!["donation".to_string()],
    )
}

#[test]
fn test_listing_crud_and_hydration() {
    let test_db = common::TestDb::new("test_listing_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    let created = repo
        .create_listing(&new_listing(alice.id, "Oak bookshelf", Category::Furniture, 20))
        .unwrap();
    assert_eq!(created.lister.name, "Alice");
    assert_eq!(created.photos.len(), 1);
    assert_eq!(created.tags, vec!["donation"]);

    let fetched = repo.get_listing_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched.title, "Oak bookshelf");
    assert_eq!(fetched.category, Category::Furniture);
    assert_eq!(fetched.photos, created.photos);
    assert_eq!(fetched.lister.name, "Alice");

    repo.delete_listing(created.id).unwrap();
    assert!(repo.get_listing_by_id(created.id).unwrap().is_none());
}

#[test]
fn test_search_filters_combine_into_one_predicate() {
    let test_db = common::TestDb::new("test_search_filters.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    repo.create_listing(&new_listing(alice.id, "Desk lamp", Category::Electronics, 5))
        .unwrap();
    repo.create_listing(&new_listing(alice.id, "Floor lamp", Category::Furniture, 40))
        .unwrap();
    repo.create_listing(&new_listing(alice.id, "Lamp shade", Category::Furniture, 8))
        .unwrap();
    repo.create_listing(&new_listing(alice.id, "Toy train", Category::Toys, 8))
        .unwrap();

    // Text only.
    let (total, _) = repo
        .search_listings(ListingSearchQuery::new("lamp"))
        .unwrap();
    assert_eq!(total, 3);

    // Text and category.
    let query = ListingSearchQuery::new("lamp")
        .categories([Category::Furniture].into_iter().collect());
    let (total, items) = repo.search_listings(query).unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|l| l.category == Category::Furniture));

    // Text, category and price joined into the same predicate.
    let query = ListingSearchQuery::new("lamp")
        .categories([Category::Furniture].into_iter().collect())
        .price(PriceRange::new(0, 10).unwrap());
    let (total, items) = repo.search_listings(query).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Lamp shade");

    // Condition filter excludes everything.
    let query = ListingSearchQuery::new("lamp")
        .conditions([Condition::Broken].into_iter().collect());
    let (total, items) = repo.search_listings(query).unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn test_search_total_is_exact_while_rows_are_paged() {
    let test_db = common::TestDb::new("test_search_paging.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    for i in 0..15 {
        repo.create_listing(&new_listing(
            alice.id,
            &format!("Chair {i}"),
            Category::Furniture,
            i,
        ))
        .unwrap();
    }

    let query = ListingSearchQuery::new("Chair").paginate(1, 12);
    let (total, items) = repo.search_listings(query).unwrap();
    assert_eq!(total, 15);
    assert_eq!(items.len(), 12);

    let query = ListingSearchQuery::new("Chair").paginate(2, 12);
    let (total, items) = repo.search_listings(query).unwrap();
    assert_eq!(total, 15);
    assert_eq!(items.len(), 3);
}

#[test]
fn test_sort_modes_order_results() {
    let test_db = common::TestDb::new("test_search_sort.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    let old = repo
        .create_listing(&new_listing(alice.id, "Reading lamp", Category::Electronics, 5))
        .unwrap();
    let new = repo
        .create_listing(&new_listing(alice.id, "Lamp stand", Category::Furniture, 5))
        .unwrap();

    // CURRENT_TIMESTAMP has second precision; spread the rows out.
    {
        use givehub::schema::listings;
        let mut conn = test_db.pool().get().unwrap();
        diesel::update(listings::table.find(old.id))
            .set(listings::created_at.eq(Utc::now().naive_utc() - Duration::hours(2)))
            .execute(&mut conn)
            .unwrap();
    }

    let query = ListingSearchQuery::new("lamp").sort(SortMode::Newest);
    let (_, items) = repo.search_listings(query).unwrap();
    assert_eq!(items[0].id, new.id);

    let query = ListingSearchQuery::new("lamp").sort(SortMode::Oldest);
    let (_, items) = repo.search_listings(query).unwrap();
    assert_eq!(items[0].id, old.id);

    // Relevance puts prefix matches first even when they are older.
    let query = ListingSearchQuery::new("lamp").sort(SortMode::Relevance);
    let (_, items) = repo.search_listings(query).unwrap();
    assert_eq!(items[0].id, new.id);
}

#[test]
fn test_suggestions_are_capped_and_deduplicated() {
    let test_db = common::TestDb::new("test_suggestions.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    for i in 0..7 {
        repo.create_listing(&new_listing(
            alice.id,
            &format!("Lamp {i}"),
            Category::Electronics,
            i,
        ))
        .unwrap();
    }
    // A duplicate title from another listing.
    repo.create_listing(&new_listing(alice.id, "Lamp 0", Category::Furniture, 1))
        .unwrap();

    let suggestions = repo.suggest_titles("lamp", 5).unwrap();
    assert_eq!(suggestions.len(), 5);
    let mut unique = suggestions.clone();
    unique.dedup();
    assert_eq!(unique, suggestions);

    assert!(repo.suggest_titles("   ", 5).unwrap().is_empty());
}

#[test]
fn test_saved_items_roundtrip_is_idempotent() {
    let test_db = common::TestDb::new("test_saved_items.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");
    let bob = create_profile(&repo, "Bob", "bob@example.com");

    let listing = repo
        .create_listing(&new_listing(alice.id, "Toy train", Category::Toys, 3))
        .unwrap();

    assert!(repo.save_listing(bob.id, listing.id).unwrap());
    // Second save of the same listing changes nothing.
    assert!(!repo.save_listing(bob.id, listing.id).unwrap());
    assert!(repo.is_listing_saved(bob.id, listing.id).unwrap());
    assert!(!repo.is_listing_saved(alice.id, listing.id).unwrap());

    let (total, items) = repo.list_saved_listings(bob.id, None).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, listing.id);
    assert_eq!(items[0].lister.name, "Alice");

    assert!(repo.unsave_listing(bob.id, listing.id).unwrap());
    assert!(!repo.unsave_listing(bob.id, listing.id).unwrap());
    let (total, _) = repo.list_saved_listings(bob.id, None).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_activity_log_filters_by_kind() {
    let test_db = common::TestDb::new("test_activity_log.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let alice = create_profile(&repo, "Alice", "alice@example.com");

    repo.log_activity(&NewActivityEntry::new(
        alice.id,
        ActivityKind::ListingCreated,
        json!({"listing_id": 1}),
    ))
    .unwrap();
    repo.log_activity(&NewActivityEntry::new(
        alice.id,
        ActivityKind::ListingSaved,
        json!({"listing_id": 1}),
    ))
    .unwrap();

    let (total, entries) = repo.list_activity(ActivityListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(entries[0].1.name, "Alice");

    let (total, entries) = repo
        .list_activity(ActivityListQuery::new().kind(ActivityKind::ListingSaved))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(entries[0].0.kind, ActivityKind::ListingSaved);
    assert_eq!(entries[0].0.detail, json!({"listing_id": 1}));
}

#[test]
fn test_profile_upsert_and_update() {
    let test_db = common::TestDb::new("test_profile_upsert.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let first = create_profile(&repo, "Alice", "Alice@Example.com");
    assert_eq!(first.email, "alice@example.com");

    // Same email upserts in place.
    let second = create_profile(&repo, "Alice Smith", "alice@example.com");
    assert_eq!(second.id, first.id);
    assert_eq!(second.name, "Alice Smith");

    let updated = repo
        .update_profile(
            first.id,
            &UpdateProfile::new(
                "Alice S.".to_string(),
                Some("https://img.example/a.png".to_string()),
                Some("Springfield".to_string()),
            ),
        )
        .unwrap();
    assert_eq!(updated.name, "Alice S.");
    assert_eq!(updated.location.as_deref(), Some("Springfield"));

    let by_email = repo.get_profile_by_email("ALICE@example.com ").unwrap();
    assert_eq!(by_email.map(|p| p.id), Some(first.id));

    let by_id = repo.get_profile_by_id(first.id).unwrap();
    assert_eq!(by_id.map(|p| p.name), Some("Alice S.".to_string()));
}
