//! In-memory implementations of the kernel repositories.
//!
//! They honor the same contracts as the Postgres implementations. The
//! whole store sits behind one mutex and every multi-step operation runs
//! under a single lock acquisition, which makes each operation atomic
//! and operations on the same slot linearizable. The lock is never held
//! across an await point.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken},
        booking::{
            event::{CancelBooking, CreateBooking},
            Booking, BookingSummary, BookingTimeSlot,
        },
        category::{event::CreateCategory, Category},
        id::{BookingId, CategoryId, TimeSlotId, UserId},
        role::Role,
        timeslot::{
            event::{CreateTimeSlot, DeleteTimeSlot, TimeSlotFilter},
            TimeSlot,
        },
        user::{event::CreateUser, User},
    },
    repository::{
        auth::AuthRepository, booking::BookingRepository, category::CategoryRepository,
        health::HealthCheckRepository, preference::PreferenceRepository,
        timeslot::TimeSlotRepository, user::UserRepository,
    },
};
use shared::error::{AppError, AppResult};

#[derive(Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A poisoned mutex still holds consistent data here because every
        // mutation completes before the guard drops.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    categories: HashMap<CategoryId, Category>,
    timeslots: HashMap<TimeSlotId, TimeSlotRecord>,
    bookings: HashMap<BookingId, BookingRecord>,
    // Uniqueness guard: at most one live booking per slot.
    bookings_by_slot: HashMap<TimeSlotId, BookingId>,
    preferences: HashMap<UserId, HashSet<CategoryId>>,
    tokens: HashMap<String, UserId>,
}

#[derive(Clone)]
struct UserRecord {
    user_id: UserId,
    user_name: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl From<&UserRecord> for User {
    fn from(value: &UserRecord) -> Self {
        User {
            user_id: value.user_id,
            user_name: value.user_name.clone(),
            email: value.email.clone(),
            role: value.role,
            created_at: value.created_at,
        }
    }
}

#[derive(Clone)]
struct TimeSlotRecord {
    timeslot_id: TimeSlotId,
    category_id: CategoryId,
    title: String,
    description: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
struct BookingRecord {
    booking_id: BookingId,
    timeslot_id: TimeSlotId,
    user_id: UserId,
    booked_at: DateTime<Utc>,
}

fn timeslot_from(record: &TimeSlotRecord, category: Category) -> TimeSlot {
    TimeSlot {
        timeslot_id: record.timeslot_id,
        category,
        title: record.title.clone(),
        description: record.description.clone(),
        start_time: record.start_time,
        end_time: record.end_time,
        created_by: record.created_by,
        created_at: record.created_at,
    }
}

fn booking_from(record: &BookingRecord, slot: &TimeSlotRecord) -> Booking {
    Booking {
        booking_id: record.booking_id,
        booked_by: record.user_id,
        booked_at: record.booked_at,
        timeslot: BookingTimeSlot {
            timeslot_id: slot.timeslot_id,
            category_id: slot.category_id,
            title: slot.title.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        },
    }
}

#[derive(new)]
pub struct InMemoryHealthCheckRepository;

#[async_trait]
impl HealthCheckRepository for InMemoryHealthCheckRepository {
    async fn check_db(&self) -> bool {
        true
    }
}

#[derive(new)]
pub struct InMemoryCategoryRepository {
    store: InMemoryStore,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, event: CreateCategory) -> AppResult<CategoryId> {
        let mut state = self.store.lock();
        if state.categories.values().any(|c| c.name == event.name) {
            return Err(AppError::UnprocessableEntity(format!(
                "category name ({}) is already taken",
                event.name
            )));
        }
        let category_id = CategoryId::new();
        state.categories.insert(
            category_id,
            Category {
                category_id,
                name: event.name,
                description: event.description,
                color: event.color,
            },
        );
        Ok(category_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let state = self.store.lock();
        let mut categories = state.categories.values().cloned().collect::<Vec<_>>();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[derive(new)]
pub struct InMemoryTimeSlotRepository {
    store: InMemoryStore,
}

#[async_trait]
impl TimeSlotRepository for InMemoryTimeSlotRepository {
    async fn create(&self, event: CreateTimeSlot) -> AppResult<TimeSlotId> {
        if event.end_time <= event.start_time {
            return Err(AppError::UnprocessableEntity(
                "end time must be after start time".into(),
            ));
        }
        let mut state = self.store.lock();
        if !state.categories.contains_key(&event.category_id) {
            return Err(AppError::UnprocessableEntity(format!(
                "category ({}) does not exist",
                event.category_id
            )));
        }
        let timeslot_id = TimeSlotId::new();
        state.timeslots.insert(
            timeslot_id,
            TimeSlotRecord {
                timeslot_id,
                category_id: event.category_id,
                title: event.title,
                description: event.description,
                start_time: event.start_time,
                end_time: event.end_time,
                created_by: event.created_by,
                created_at: Utc::now(),
            },
        );
        Ok(timeslot_id)
    }

    async fn delete(&self, event: DeleteTimeSlot) -> AppResult<()> {
        let mut state = self.store.lock();
        if !state.timeslots.contains_key(&event.timeslot_id) {
            return Err(AppError::EntityNotFound(format!(
                "time slot ({}) was not found",
                event.timeslot_id
            )));
        }
        // Cascade: the booking goes first, then the slot, under the same
        // lock, so no reader can see an orphaned booking.
        if let Some(booking_id) = state.bookings_by_slot.remove(&event.timeslot_id) {
            state.bookings.remove(&booking_id);
        }
        state.timeslots.remove(&event.timeslot_id);
        Ok(())
    }

    async fn find_all(&self, filter: TimeSlotFilter) -> AppResult<Vec<TimeSlot>> {
        let state = self.store.lock();
        let mut records = state
            .timeslots
            .values()
            .filter(|r| filter.start_after.map_or(true, |t| r.start_time >= t))
            .filter(|r| filter.end_before.map_or(true, |t| r.end_time <= t))
            .filter(|r| {
                filter.category_ids.is_empty() || filter.category_ids.contains(&r.category_id)
            })
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|r| (r.start_time, r.timeslot_id));
        records
            .into_iter()
            .map(|r| {
                let category = state
                    .categories
                    .get(&r.category_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::ConversionEntityError(format!(
                            "category ({}) referenced by slot ({}) is missing",
                            r.category_id, r.timeslot_id
                        ))
                    })?;
                Ok(timeslot_from(&r, category))
            })
            .collect()
    }

    async fn find_by_id(&self, timeslot_id: TimeSlotId) -> AppResult<Option<TimeSlot>> {
        let state = self.store.lock();
        let Some(record) = state.timeslots.get(&timeslot_id) else {
            return Ok(None);
        };
        let category = state
            .categories
            .get(&record.category_id)
            .cloned()
            .ok_or_else(|| {
                AppError::ConversionEntityError(format!(
                    "category ({}) referenced by slot ({}) is missing",
                    record.category_id, timeslot_id
                ))
            })?;
        Ok(Some(timeslot_from(record, category)))
    }
}

#[derive(new)]
pub struct InMemoryBookingRepository {
    store: InMemoryStore,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    // Existence check and conditional insert happen under one lock
    // acquisition, the in-memory counterpart of the unique-constraint
    // guarded insert in the Postgres implementation.
    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut state = self.store.lock();
        let Some(slot) = state.timeslots.get(&event.timeslot_id).cloned() else {
            return Err(AppError::EntityNotFound(format!(
                "time slot ({}) was not found",
                event.timeslot_id
            )));
        };
        if state.bookings_by_slot.contains_key(&event.timeslot_id) {
            return Err(AppError::ResourceConflict(format!(
                "time slot ({}) is already booked",
                event.timeslot_id
            )));
        }
        let record = BookingRecord {
            booking_id: BookingId::new(),
            timeslot_id: event.timeslot_id,
            user_id: event.booked_by,
            booked_at: Utc::now(),
        };
        state
            .bookings_by_slot
            .insert(record.timeslot_id, record.booking_id);
        state.bookings.insert(record.booking_id, record.clone());
        Ok(booking_from(&record, &slot))
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut state = self.store.lock();
        let Some(record) = state.bookings.get(&event.booking_id) else {
            return Err(AppError::EntityNotFound(format!(
                "booking ({}) was not found",
                event.booking_id
            )));
        };
        if record.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        let timeslot_id = record.timeslot_id;
        state.bookings.remove(&event.booking_id);
        state.bookings_by_slot.remove(&timeslot_id);
        Ok(())
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let state = self.store.lock();
        let mut records = state
            .bookings
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        records.sort_by_key(|r| (r.booked_at, r.booking_id));
        records
            .into_iter()
            .map(|r| {
                let slot = state.timeslots.get(&r.timeslot_id).ok_or_else(|| {
                    AppError::ConversionEntityError(format!(
                        "slot ({}) referenced by booking ({}) is missing",
                        r.timeslot_id, r.booking_id
                    ))
                })?;
                Ok(booking_from(&r, slot))
            })
            .collect()
    }

    async fn find_summaries_by_timeslot_ids(
        &self,
        timeslot_ids: &[TimeSlotId],
    ) -> AppResult<Vec<BookingSummary>> {
        let state = self.store.lock();
        let mut summaries = Vec::new();
        for timeslot_id in timeslot_ids {
            let Some(booking_id) = state.bookings_by_slot.get(timeslot_id) else {
                continue;
            };
            let Some(record) = state.bookings.get(booking_id) else {
                continue;
            };
            let user = state.users.get(&record.user_id).ok_or_else(|| {
                AppError::ConversionEntityError(format!(
                    "user ({}) referenced by booking ({}) is missing",
                    record.user_id, record.booking_id
                ))
            })?;
            summaries.push(BookingSummary {
                booking_id: record.booking_id,
                timeslot_id: record.timeslot_id,
                booked_by: record.user_id,
                user_name: user.user_name.clone(),
                user_email: user.email.clone(),
                booked_at: record.booked_at,
            });
        }
        Ok(summaries)
    }
}

#[derive(new)]
pub struct InMemoryPreferenceRepository {
    store: InMemoryStore,
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn replace(&self, user_id: UserId, category_ids: Vec<CategoryId>) -> AppResult<()> {
        let mut state = self.store.lock();
        // Unknown ids are dropped, matching the Postgres insert-by-select.
        let next = category_ids
            .into_iter()
            .filter(|id| state.categories.contains_key(id))
            .collect::<HashSet<_>>();
        state.preferences.insert(user_id, next);
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Category>> {
        let state = self.store.lock();
        let mut categories = state
            .preferences
            .get(&user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.categories.get(id).cloned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[derive(new)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
        let mut state = self.store.lock();
        if state.users.values().any(|u| u.email == event.email) {
            return Err(AppError::UnprocessableEntity(format!(
                "email ({}) is already registered",
                event.email
            )));
        }
        let record = UserRecord {
            user_id: UserId::new(),
            user_name: event.user_name,
            email: event.email,
            password_hash,
            role: event.role,
            created_at: Utc::now(),
        };
        let user = User::from(&record);
        state.users.insert(record.user_id, record);
        Ok(user)
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let state = self.store.lock();
        Ok(state.users.get(&current_user_id).map(User::from))
    }
}

#[derive(new)]
pub struct InMemoryAuthRepository {
    store: InMemoryStore,
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let state = self.store.lock();
        Ok(state.tokens.get(&access_token.0).copied())
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let (user_id, password_hash) = {
            let state = self.store.lock();
            let Some(record) = state.users.values().find(|u| u.email == email) else {
                return Err(AppError::UnauthenticatedError);
            };
            (record.user_id, record.password_hash.clone())
        };
        let valid = bcrypt::verify(password, &password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }
        Ok(user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let access_token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        let mut state = self.store.lock();
        state.tokens.insert(access_token.0.clone(), event.user_id);
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let mut state = self.store.lock();
        state.tokens.remove(&access_token.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    struct Fixture {
        store: InMemoryStore,
        categories: InMemoryCategoryRepository,
        timeslots: InMemoryTimeSlotRepository,
        bookings: InMemoryBookingRepository,
        preferences: InMemoryPreferenceRepository,
        users: InMemoryUserRepository,
    }

    impl Fixture {
        fn new() -> Self {
            let store = InMemoryStore::new();
            Self {
                categories: InMemoryCategoryRepository::new(store.clone()),
                timeslots: InMemoryTimeSlotRepository::new(store.clone()),
                bookings: InMemoryBookingRepository::new(store.clone()),
                preferences: InMemoryPreferenceRepository::new(store.clone()),
                users: InMemoryUserRepository::new(store.clone()),
                store,
            }
        }

        async fn category(&self, name: &str) -> CategoryId {
            self.categories
                .create(CreateCategory {
                    name: name.into(),
                    description: format!("{name} events"),
                    color: "#3f51b5".into(),
                })
                .await
                .unwrap()
        }

        async fn slot(&self, category_id: CategoryId, start: DateTime<Utc>) -> TimeSlotId {
            self.timeslots
                .create(CreateTimeSlot::new(
                    category_id,
                    "slot".into(),
                    String::new(),
                    start,
                    start + chrono::Duration::hours(1),
                    UserId::new(),
                ))
                .await
                .unwrap()
        }

        async fn user(&self, name: &str) -> User {
            self.users
                .create(CreateUser::new(
                    name.into(),
                    format!("{name}@example.com"),
                    "passw0rd".into(),
                    Role::User,
                ))
                .await
                .unwrap()
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_reserves_admit_exactly_one() {
        let fixture = Fixture::new();
        let category_id = fixture.category("ops").await;
        let timeslot_id = fixture.slot(category_id, at(2024, 1, 1, 10)).await;

        let repo = Arc::new(InMemoryBookingRepository::new(fixture.store.clone()));
        let mut handles = Vec::new();
        for _ in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.reserve(CreateBooking::new(timeslot_id, UserId::new()))
                    .await
            }));
        }

        let mut admitted = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(AppError::ResourceConflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(conflicts, 31);

        // The slot stays claimed afterwards.
        let res = repo
            .reserve(CreateBooking::new(timeslot_id, UserId::new()))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));
    }

    #[tokio::test]
    async fn slot_is_bookable_again_after_cancellation() {
        let fixture = Fixture::new();
        let category_id = fixture.category("yoga").await;
        let timeslot_id = fixture.slot(category_id, at(2024, 1, 1, 10)).await;
        let alice = fixture.user("alice").await;
        let bob = fixture.user("bob").await;

        let booking = fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, alice.user_id))
            .await
            .unwrap();

        // Still claimed until the cancel lands.
        let res = fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, bob.user_id))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        fixture
            .bookings
            .cancel(CancelBooking::new(booking.booking_id, alice.user_id))
            .await
            .unwrap();

        let rebooked = fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, bob.user_id))
            .await
            .unwrap();
        assert_eq!(rebooked.booked_by, bob.user_id);
        assert_eq!(rebooked.timeslot.timeslot_id, timeslot_id);
    }

    #[tokio::test]
    async fn cancel_is_owner_only() {
        let fixture = Fixture::new();
        let category_id = fixture.category("chess").await;
        let timeslot_id = fixture.slot(category_id, at(2024, 1, 1, 10)).await;
        let alice = fixture.user("alice").await;
        let bob = fixture.user("bob").await;

        let booking = fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, alice.user_id))
            .await
            .unwrap();

        let res = fixture
            .bookings
            .cancel(CancelBooking::new(booking.booking_id, bob.user_id))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        // The booking survived the rejected cancel.
        let bookings = fixture
            .bookings
            .find_all_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].booking_id, booking.booking_id);
    }

    #[tokio::test]
    async fn cancel_unknown_booking_is_not_found() {
        let fixture = Fixture::new();
        let res = fixture
            .bookings
            .cancel(CancelBooking::new(BookingId::new(), UserId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn reserve_unknown_slot_is_not_found() {
        let fixture = Fixture::new();
        let res = fixture
            .bookings
            .reserve(CreateBooking::new(TimeSlotId::new(), UserId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn deleting_a_slot_cascades_to_its_booking() {
        let fixture = Fixture::new();
        let category_id = fixture.category("sauna").await;
        let timeslot_id = fixture.slot(category_id, at(2024, 1, 1, 10)).await;
        let alice = fixture.user("alice").await;

        fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, alice.user_id))
            .await
            .unwrap();

        fixture
            .timeslots
            .delete(DeleteTimeSlot::new(timeslot_id))
            .await
            .unwrap();

        let bookings = fixture
            .bookings
            .find_all_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert!(bookings.is_empty());

        // The slot id is gone for good; reserving it again is not a
        // conflict but a missing slot.
        let res = fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, alice.user_id))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn delete_unknown_slot_is_not_found() {
        let fixture = Fixture::new();
        let res = fixture
            .timeslots
            .delete(DeleteTimeSlot::new(TimeSlotId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn listing_filters_by_time_and_category_in_start_order() {
        let fixture = Fixture::new();
        let cat1 = fixture.category("cat-1").await;
        let cat2 = fixture.category("cat-2").await;
        let first = fixture.slot(cat1, at(2024, 1, 1, 10)).await;
        let second = fixture.slot(cat1, at(2024, 1, 2, 10)).await;
        let _third = fixture.slot(cat2, at(2024, 1, 3, 10)).await;

        let found = fixture
            .timeslots
            .find_all(TimeSlotFilter {
                start_after: Some(at(2024, 1, 1, 0)),
                end_before: None,
                category_ids: vec![cat1],
            })
            .await
            .unwrap();

        assert_eq!(
            found.iter().map(|t| t.timeslot_id).collect::<Vec<_>>(),
            vec![first, second]
        );
    }

    #[tokio::test]
    async fn listing_breaks_start_time_ties_by_id() {
        let fixture = Fixture::new();
        let category_id = fixture.category("tied").await;
        let a = fixture.slot(category_id, at(2024, 6, 1, 9)).await;
        let b = fixture.slot(category_id, at(2024, 6, 1, 9)).await;
        let mut expected = vec![a, b];
        expected.sort();

        let found = fixture
            .timeslots
            .find_all(TimeSlotFilter::default())
            .await
            .unwrap();
        assert_eq!(
            found.iter().map(|t| t.timeslot_id).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn slot_creation_validates_time_range_and_category() {
        let fixture = Fixture::new();
        let category_id = fixture.category("valid").await;

        let start = at(2024, 1, 1, 10);
        let res = fixture
            .timeslots
            .create(CreateTimeSlot::new(
                category_id,
                "backwards".into(),
                String::new(),
                start,
                start,
                UserId::new(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let res = fixture
            .timeslots
            .create(CreateTimeSlot::new(
                CategoryId::new(),
                "orphan".into(),
                String::new(),
                start,
                start + chrono::Duration::hours(1),
                UserId::new(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn preference_replace_is_idempotent_and_atomic() {
        let fixture = Fixture::new();
        let cat1 = fixture.category("cat-1").await;
        let cat2 = fixture.category("cat-2").await;
        let alice = fixture.user("alice").await;

        fixture
            .preferences
            .replace(alice.user_id, vec![cat1, cat2])
            .await
            .unwrap();
        fixture
            .preferences
            .replace(alice.user_id, vec![cat1, cat2])
            .await
            .unwrap();

        let preferred = fixture
            .preferences
            .find_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert_eq!(preferred.len(), 2);

        // A later replace swaps the whole set, not a merge.
        fixture
            .preferences
            .replace(alice.user_id, vec![cat2])
            .await
            .unwrap();
        let preferred = fixture
            .preferences
            .find_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert_eq!(
            preferred.iter().map(|c| c.category_id).collect::<Vec<_>>(),
            vec![cat2]
        );
    }

    #[tokio::test]
    async fn preference_replace_drops_unknown_category_ids() {
        let fixture = Fixture::new();
        let cat1 = fixture.category("cat-1").await;
        let alice = fixture.user("alice").await;

        fixture
            .preferences
            .replace(alice.user_id, vec![cat1, CategoryId::new()])
            .await
            .unwrap();

        let preferred = fixture
            .preferences
            .find_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert_eq!(
            preferred.iter().map(|c| c.category_id).collect::<Vec<_>>(),
            vec![cat1]
        );
    }

    #[tokio::test]
    async fn user_bookings_carry_the_referenced_slot() {
        let fixture = Fixture::new();
        let category_id = fixture.category("talks").await;
        let start = at(2024, 3, 5, 14);
        let timeslot_id = fixture.slot(category_id, start).await;
        let alice = fixture.user("alice").await;

        fixture
            .bookings
            .reserve(CreateBooking::new(timeslot_id, alice.user_id))
            .await
            .unwrap();

        let bookings = fixture
            .bookings
            .find_all_by_user_id(alice.user_id)
            .await
            .unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].timeslot.timeslot_id, timeslot_id);
        assert_eq!(bookings[0].timeslot.start_time, start);
        assert_eq!(bookings[0].timeslot.category_id, category_id);
    }

    #[tokio::test]
    async fn summaries_report_only_booked_slots() {
        let fixture = Fixture::new();
        let category_id = fixture.category("mixed").await;
        let booked = fixture.slot(category_id, at(2024, 1, 1, 10)).await;
        let free = fixture.slot(category_id, at(2024, 1, 2, 10)).await;
        let alice = fixture.user("alice").await;

        fixture
            .bookings
            .reserve(CreateBooking::new(booked, alice.user_id))
            .await
            .unwrap();

        let summaries = fixture
            .bookings
            .find_summaries_by_timeslot_ids(&[booked, free])
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].timeslot_id, booked);
        assert_eq!(summaries[0].booked_by, alice.user_id);
        assert_eq!(summaries[0].user_email, "alice@example.com");
    }
}
