//! Profile store: creation, selection, deletion and snapshot installation.

use tracing::{info, warn};
use uuid::Uuid;

use pocket_domain::{default_categories, Profile, ProfileBook, ProfileData};

use crate::{validation::require_text, CoreError, ServiceResult};

pub struct ProfileService;

impl ProfileService {
    /// Creates a profile seeded with the default categories and returns its id.
    ///
    /// The new profile becomes active when no other profile is.
    pub fn create_profile(
        book: &mut ProfileBook,
        name: &str,
        country_code: &str,
        currency: &str,
    ) -> ServiceResult<Uuid> {
        let name = require_text(name, "profile name")?;
        let country_code = require_text(country_code, "country code")?.to_uppercase();
        let currency = require_text(currency, "currency")?.to_uppercase();

        let mut profile = Profile::new(name, country_code, currency);
        profile.data.categories = default_categories();
        let id = profile.id;
        book.profiles.push(profile);
        if book.active().is_none() {
            book.active_profile_id = Some(id);
        }
        info!(profile_id = %id, "profile created");
        Ok(id)
    }

    /// Removes a profile and all of its data; clears the selection if it was active.
    pub fn delete_profile(book: &mut ProfileBook, id: Uuid) -> ServiceResult<()> {
        if book.profile(id).is_none() {
            return Err(CoreError::NotFound("Profile", id));
        }
        book.profiles.retain(|profile| profile.id != id);
        if book.active_profile_id == Some(id) {
            book.active_profile_id = None;
        }
        warn!(profile_id = %id, "profile deleted");
        Ok(())
    }

    pub fn select_profile(book: &mut ProfileBook, id: Uuid) -> ServiceResult<()> {
        if book.profile(id).is_none() {
            return Err(CoreError::NotFound("Profile", id));
        }
        book.active_profile_id = Some(id);
        Ok(())
    }

    pub fn active_data(book: &ProfileBook) -> ServiceResult<&ProfileData> {
        book.active()
            .map(|profile| &profile.data)
            .ok_or(CoreError::NoActiveProfile)
    }

    /// Runs `operation` against the active profile's snapshot and installs the
    /// result only when it succeeds.
    pub fn apply<F>(book: &mut ProfileBook, operation: F) -> ServiceResult<()>
    where
        F: FnOnce(&ProfileData) -> ServiceResult<ProfileData>,
    {
        let id = book.active_profile_id.ok_or(CoreError::NoActiveProfile)?;
        let profile = book.profile_mut(id).ok_or(CoreError::NoActiveProfile)?;
        let next = operation(&profile.data)?;
        profile.data = next;
        profile.touch();
        Ok(())
    }
}
