use diesel::prelude::*;

use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::repository::{
    DieselRepository, ProfileReader, ProfileWriter,
    errors::RepositoryResult,
};

impl ProfileReader for DieselRepository {
    fn get_profile_by_id(&self, id: i32) -> RepositoryResult<Option<Profile>> {
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let profile = profiles::table
            .find(id)
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(Into::into))
    }

    fn get_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>> {
        use crate::models::profile::Profile as DbProfile;
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let profile = profiles::table
            .filter(profiles::email.eq(email.trim().to_lowercase()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(Into::into))
    }
}

impl ProfileWriter for DieselRepository {
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        use crate::models::profile::{NewProfile as DbNewProfile, Profile as DbProfile};
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let insertable: DbNewProfile = new_profile.into();

        let profile: DbProfile = diesel::insert_into(profiles::table)
            .values(&insertable)
            .on_conflict(profiles::email)
            .do_update()
            .set((
                profiles::name.eq(new_profile.name.as_str()),
                profiles::updated_at.eq(diesel::dsl::now),
            ))
            .get_result(&mut conn)?;

        Ok(profile.into())
    }

    fn update_profile(&self, profile_id: i32, updates: &UpdateProfile) -> RepositoryResult<Profile> {
        use crate::models::profile::{Profile as DbProfile, UpdateProfile as DbUpdateProfile};
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateProfile = updates.into();

        let updated = diesel::update(profiles::table.find(profile_id))
            .set((&db_updates, profiles::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbProfile>(&mut conn)?;

        Ok(updated.into())
    }
}
