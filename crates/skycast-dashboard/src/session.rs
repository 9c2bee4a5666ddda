//! Last viewed location, kept in the process-wide key-value store.

use std::sync::Arc;

use skycast_core::{KeyValueStore, MemoryStore, StoreError};
use skycast_weather::Location;

pub const LAST_CITY_KEY: &str = "lastCity";
pub const LAST_LAT_KEY: &str = "lastLat";
pub const LAST_LON_KEY: &str = "lastLon";

/// What a previous run left behind.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedLocation {
    /// Name and coordinates, ready to load.
    Resolved(Location),
    /// Only a city name; coordinates must be looked up again.
    NameOnly(String),
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn load(&self) -> Option<SavedLocation> {
        let city = self
            .store
            .get(LAST_CITY_KEY)
            .filter(|c| !c.trim().is_empty())?;

        let coords = self
            .store
            .get(LAST_LAT_KEY)
            .zip(self.store.get(LAST_LON_KEY))
            .and_then(|(lat, lon)| {
                Some((
                    lat.trim().parse::<f64>().ok()?,
                    lon.trim().parse::<f64>().ok()?,
                ))
            });

        match coords {
            Some((lat, lon)) => match Location::validated(city.as_str(), lat, lon) {
                Ok(location) => Some(SavedLocation::Resolved(location)),
                Err(e) => {
                    tracing::warn!("Saved coordinates for {} are unusable: {}", city, e);
                    Some(SavedLocation::NameOnly(city))
                }
            },
            None => Some(SavedLocation::NameOnly(city)),
        }
    }

    pub fn save(&self, location: &Location) -> Result<(), StoreError> {
        self.store.set_many(&[
            (LAST_CITY_KEY, location.display_name.clone()),
            (LAST_LAT_KEY, location.latitude.to_string()),
            (LAST_LON_KEY, location.longitude.to_string()),
        ])
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::FileStore;

    #[test]
    fn test_empty_session() {
        assert_eq!(Session::in_memory().load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let session = Session::in_memory();
        let london = Location::validated("London, GB", 51.5074, -0.1278).unwrap();
        session.save(&london).unwrap();
        assert_eq!(session.load(), Some(SavedLocation::Resolved(london)));
    }

    #[test]
    fn test_numbers_stored_as_strings() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        let loc = Location::validated("Quito, EC", -0.1807, -78.4678).unwrap();
        session.save(&loc).unwrap();
        assert_eq!(store.get(LAST_LAT_KEY).as_deref(), Some("-0.1807"));
        assert_eq!(store.get(LAST_LON_KEY).as_deref(), Some("-78.4678"));
    }

    #[test]
    fn test_name_only_session() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_CITY_KEY, "Madrid".into()).unwrap();
        let session = Session::new(store);
        assert_eq!(
            session.load(),
            Some(SavedLocation::NameOnly("Madrid".into()))
        );
    }

    #[test]
    fn test_garbled_coordinates_fall_back_to_name() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_many(&[
                (LAST_CITY_KEY, "Cairo, EG".into()),
                (LAST_LAT_KEY, "abc".into()),
                (LAST_LON_KEY, "31.2".into()),
            ])
            .unwrap();
        let session = Session::new(store.clone());
        assert_eq!(
            session.load(),
            Some(SavedLocation::NameOnly("Cairo, EG".into()))
        );

        store.set(LAST_LAT_KEY, "95.0".into()).unwrap();
        assert_eq!(
            session.load(),
            Some(SavedLocation::NameOnly("Cairo, EG".into()))
        );
    }

    #[test]
    fn test_file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let tokyo = Location::validated("Tokyo, JP", 35.6895, 139.6917).unwrap();

        Session::new(Arc::new(FileStore::open(&path).unwrap()))
            .save(&tokyo)
            .unwrap();

        let restored = Session::new(Arc::new(FileStore::open(&path).unwrap()));
        assert_eq!(restored.load(), Some(SavedLocation::Resolved(tokyo)));
    }
}
