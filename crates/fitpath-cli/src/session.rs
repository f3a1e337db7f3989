//! Wiring for commands that need the day flow: pool, store, coach.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use fitpath_core::ai::{Coach, Collaborator, GeminiClient, Offline};
use fitpath_core::day::{Clock, SystemClock};
use fitpath_core::flow::{DayFlow, View};
use fitpath_core::store::LocalStore;
use fitpath_db::backend::SqliteKv;
use fitpath_db::pool;

use crate::config::FitpathConfig;

/// An open database plus a started [`DayFlow`].
pub struct Session {
    pub flow: DayFlow,
    pool: SqlitePool,
}

impl Session {
    /// Open (and migrate) the database, pick a collaborator, and restore
    /// the session from the store.
    pub async fn open(config: &FitpathConfig) -> Result<Self> {
        let db_pool = pool::open(&config.db_config).await?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = LocalStore::new(Arc::new(SqliteKv::new(db_pool.clone())), clock.clone());

        let collaborator = collaborator_for(config)?;
        let mut flow = DayFlow::new(store, Coach::new(collaborator, clock));
        let view = flow.start().await;
        debug!(%view, "session opened");

        Ok(Self {
            flow,
            pool: db_pool,
        })
    }

    /// Like [`Session::open`], but fail unless a profile exists.
    pub async fn open_onboarded(config: &FitpathConfig) -> Result<Self> {
        let session = Self::open(config).await?;
        if session.flow.view() == View::Onboarding {
            session.close().await;
            bail!("no profile found; run `fitpath onboard` first");
        }
        Ok(session)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn collaborator_for(config: &FitpathConfig) -> Result<Arc<dyn Collaborator>> {
    match &config.gemini {
        Some(gemini) => {
            let client =
                GeminiClient::new(gemini.clone()).context("failed to build Gemini client")?;
            debug!(model = %gemini.model, "using Gemini collaborator");
            Ok(Arc::new(client))
        }
        None => {
            warn!("no Gemini API key configured; AI features will use offline fallbacks");
            Ok(Arc::new(Offline))
        }
    }
}
