//! Application state wiring the server's services together.
//!
//! `InterviewerService` and `AgentSync` are generic over their ports; AppState
//! pins them to the SQLite repository and a boxed agent client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use persona_core::agent::box_client::BoxAgentClient;
use persona_core::agent::sync::AgentSync;
use persona_core::service::interviewer::InterviewerService;
use persona_infra::agent::retell::RetellAgentClient;
use persona_infra::config::resolve_retell_api_key;
use persona_infra::filesystem::database_path;
use persona_infra::sqlite::interviewer::SqliteInterviewerRepository;
use persona_infra::sqlite::pool::{DatabasePool, database_url};
use persona_types::config::GlobalConfig;
use secrecy::SecretString;

pub type ConcreteInterviewerService = InterviewerService<SqliteInterviewerRepository>;

/// Shared state for the REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub interviewer_service: Arc<ConcreteInterviewerService>,
    pub agent_sync: Arc<AgentSync<BoxAgentClient>>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database in `data_dir` and connect the Retell client.
    pub async fn init(data_dir: PathBuf, config: &GlobalConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&database_path(&data_dir))).await?;

        let api_key = match resolve_retell_api_key(&config.retell) {
            Some(key) => key,
            None => {
                tracing::warn!(
                    env = %config.retell.api_key_env,
                    "voice agent API key not set; agent sync calls will be rejected"
                );
                SecretString::from(String::new())
            }
        };
        let retell = RetellAgentClient::new(
            api_key,
            Duration::from_secs(config.retell.timeout_secs),
        )?
        .with_base_url(config.retell.base_url.clone());

        Ok(Self::new(db_pool, BoxAgentClient::new(retell), data_dir))
    }

    pub fn new(
        db_pool: DatabasePool,
        agent_client: BoxAgentClient,
        data_dir: PathBuf,
    ) -> Self {
        let repo = SqliteInterviewerRepository::new(db_pool.clone());
        Self {
            interviewer_service: Arc::new(InterviewerService::new(repo)),
            agent_sync: Arc::new(AgentSync::new(agent_client)),
            data_dir,
            db_pool,
        }
    }
}
