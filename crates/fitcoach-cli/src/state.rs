//! Application state wiring the services together.
//!
//! Services in `fitcoach-core` are generic over their ports. AppState pins
//! them to the SQLite store, the in-process session cache and the reqwest
//! backend client.

use std::path::PathBuf;
use std::sync::Arc;

use fitcoach_core::auth::AuthSession;
use fitcoach_core::chat::{ConversationController, RedirectTiming, ResponseDispatcher};
use fitcoach_core::plan::PlanService;
use fitcoach_core::profile::{ProfileService, ProgressTracker};
use fitcoach_core::storage::MemoryKvStore;
use fitcoach_infra::filesystem::ensure_data_dir;
use fitcoach_infra::http::ApiClient;
use fitcoach_infra::sqlite::kv::SqliteKvStore;
use fitcoach_infra::sqlite::pool::{DatabasePool, database_url};
use fitcoach_types::config::ClientConfig;

pub type DurableStore = Arc<SqliteKvStore>;

/// Stand-in for per-tab session storage: lives as long as the process.
pub type SessionCache = Arc<MemoryKvStore>;

pub type Api = ApiClient<DurableStore>;

pub type ConcreteAuthSession = AuthSession<Api, DurableStore>;
pub type ConcretePlanService = PlanService<Api, DurableStore, SessionCache>;
pub type ConcreteProfileService = ProfileService<Api>;
pub type ConcreteController = ConversationController<Api, DurableStore, SessionCache>;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
    pub store: DurableStore,
    pub session_cache: SessionCache,
    pub api: Api,
}

impl AppState {
    /// Open the local database and build the backend client.
    pub async fn init(data_dir: PathBuf, config: ClientConfig) -> anyhow::Result<Self> {
        ensure_data_dir(&data_dir).await?;

        let db_url = format!("{}?mode=rwc", database_url(&data_dir));
        let pool = DatabasePool::new(&db_url).await?;
        let store = Arc::new(SqliteKvStore::new(pool));

        let api = ApiClient::new(
            config.api_base_url.clone(),
            config.request_timeout(),
            store.clone(),
        )?;

        Ok(Self {
            data_dir,
            config,
            store,
            session_cache: Arc::new(MemoryKvStore::new()),
            api,
        })
    }

    /// Auth session restored from the durable store.
    pub async fn auth_session(&self) -> anyhow::Result<ConcreteAuthSession> {
        let mut session = AuthSession::new(self.api.clone(), self.store.clone());
        session.init().await?;
        Ok(session)
    }

    pub fn plans(&self) -> ConcretePlanService {
        PlanService::new(
            self.api.clone(),
            self.store.clone(),
            self.session_cache.clone(),
        )
    }

    pub fn profile(&self) -> ConcreteProfileService {
        ProfileService::new(self.api.clone())
    }

    pub async fn progress(&self) -> ProgressTracker<DurableStore> {
        ProgressTracker::load(self.store.clone()).await
    }

    pub fn conversation(&self) -> ConcreteController {
        ConversationController::new(
            self.api.clone(),
            self.store.clone(),
            self.session_cache.clone(),
            ResponseDispatcher::new(self.redirect_timing()),
        )
    }

    pub fn redirect_timing(&self) -> RedirectTiming {
        RedirectTiming {
            plan: self.config.plan_redirect_delay(),
            login: self.config.login_redirect_delay(),
        }
    }
}
