use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl,
        booking::BookingRepositoryImpl,
        category::CategoryRepositoryImpl,
        health::HealthCheckRepositoryImpl,
        memory::{
            InMemoryAuthRepository, InMemoryBookingRepository, InMemoryCategoryRepository,
            InMemoryHealthCheckRepository, InMemoryPreferenceRepository, InMemoryStore,
            InMemoryTimeSlotRepository, InMemoryUserRepository,
        },
        preference::PreferenceRepositoryImpl,
        timeslot::TimeSlotRepositoryImpl,
        user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    auth::AuthRepository, booking::BookingRepository, category::CategoryRepository,
    health::HealthCheckRepository, preference::PreferenceRepository,
    timeslot::TimeSlotRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    category_repository: Arc<dyn CategoryRepository>,
    timeslot_repository: Arc<dyn TimeSlotRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    preference_repository: Arc<dyn PreferenceRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, kv: Arc<RedisClient>, app_config: AppConfig) -> Self {
        Self {
            health_check_repository: Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            category_repository: Arc::new(CategoryRepositoryImpl::new(pool.clone())),
            timeslot_repository: Arc::new(TimeSlotRepositoryImpl::new(pool.clone())),
            booking_repository: Arc::new(BookingRepositoryImpl::new(pool.clone())),
            preference_repository: Arc::new(PreferenceRepositoryImpl::new(pool.clone())),
            user_repository: Arc::new(UserRepositoryImpl::new(pool.clone())),
            auth_repository: Arc::new(AuthRepositoryImpl::new(
                pool.clone(),
                kv.clone(),
                app_config.auth.ttl,
            )),
        }
    }

    /// Wires every repository to one shared in-memory store. Used by the
    /// test suites and for running the service without Postgres/Redis.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            health_check_repository: Arc::new(InMemoryHealthCheckRepository::new()),
            category_repository: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            timeslot_repository: Arc::new(InMemoryTimeSlotRepository::new(store.clone())),
            booking_repository: Arc::new(InMemoryBookingRepository::new(store.clone())),
            preference_repository: Arc::new(InMemoryPreferenceRepository::new(store.clone())),
            user_repository: Arc::new(InMemoryUserRepository::new(store.clone())),
            auth_repository: Arc::new(InMemoryAuthRepository::new(store)),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn category_repository(&self) -> Arc<dyn CategoryRepository> {
        self.category_repository.clone()
    }

    pub fn timeslot_repository(&self) -> Arc<dyn TimeSlotRepository> {
        self.timeslot_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn preference_repository(&self) -> Arc<dyn PreferenceRepository> {
        self.preference_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }
}
