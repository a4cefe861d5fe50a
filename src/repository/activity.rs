use diesel::prelude::*;

use crate::domain::activity::{ActivityEntry, NewActivityEntry};
use crate::domain::profile::Profile;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository, Pagination,
    errors::RepositoryResult,
};

impl ActivityReader for DieselRepository {
    fn list_activity(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<(ActivityEntry, Profile)>)> {
        use crate::models::activity::ActivityEntry as DbActivityEntry;
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::{activity_log, profiles};

        let mut conn = self.conn()?;

        let mut rows = activity_log::table
            .inner_join(profiles::table)
            .order(activity_log::created_at.desc())
            .select((activity_log::all_columns, profiles::all_columns))
            .into_boxed();
        let mut count = activity_log::table.into_boxed();

        if let Some(kind) = &query.kind {
            rows = rows.filter(activity_log::kind.eq(kind.to_string()));
            count = count.filter(activity_log::kind.eq(kind.to_string()));
        }

        if let Some(Pagination { page, per_page }) = query.pagination {
            let page = if page == 0 { 1 } else { page };
            rows = rows
                .limit(per_page as i64)
                .offset(((page - 1) * per_page) as i64);
        }

        let entries = rows
            .load::<(DbActivityEntry, DbProfile)>(&mut conn)?
            .into_iter()
            .map(|(entry, profile)| (entry.into(), profile.into()))
            .collect();

        let total: i64 = count.count().get_result(&mut conn)?;

        Ok((total as usize, entries))
    }
}

impl ActivityWriter for DieselRepository {
    fn log_activity(&self, entry: &NewActivityEntry) -> RepositoryResult<ActivityEntry> {
        use crate::models::activity::{
            ActivityEntry as DbActivityEntry, NewActivityEntry as DbNewActivityEntry,
        };
        use crate::schema::activity_log;

        let mut conn = self.conn()?;
        let insertable: DbNewActivityEntry = entry.into();

        let created: DbActivityEntry = diesel::insert_into(activity_log::table)
            .values(&insertable)
            .get_result(&mut conn)?;

        Ok(created.into())
    }
}
