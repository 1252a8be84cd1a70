//! Per-session cache of team aggregates
//!
//! Mutations do not touch the cache themselves. The views invalidate the
//! affected team after a successful write and read it back.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use teamattr_core::{ActingUser, AttributeError, AttributeService, TeamView};

pub struct TeamQueryCache {
    service: Arc<dyn AttributeService>,
    actor: ActingUser,
    teams: RwLock<HashMap<i32, TeamView>>,
}

impl TeamQueryCache {
    pub fn new(service: Arc<dyn AttributeService>, actor: ActingUser) -> Self {
        Self {
            service,
            actor,
            teams: RwLock::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> &dyn AttributeService {
        self.service.as_ref()
    }

    pub fn actor(&self) -> &ActingUser {
        &self.actor
    }

    /// Cached team, fetched on miss. Errors are not cached.
    pub async fn get(&self, team_id: i32) -> Result<TeamView, AttributeError> {
        if let Some(team) = self.teams.read().await.get(&team_id) {
            return Ok(team.clone());
        }

        debug!("Team {} not cached, fetching", team_id);
        let team = self.service.get_team(&self.actor, team_id).await?;
        self.teams.write().await.insert(team_id, team.clone());

        Ok(team)
    }

    pub async fn invalidate(&self, team_id: i32) {
        if self.teams.write().await.remove(&team_id).is_some() {
            debug!("Invalidated cached team {}", team_id);
        }
    }

    pub async fn invalidate_all(&self) {
        self.teams.write().await.clear();
    }

    pub async fn is_cached(&self, team_id: i32) -> bool {
        self.teams.read().await.contains_key(&team_id)
    }
}
