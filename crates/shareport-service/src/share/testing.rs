//! Scripted gateway double for workflow tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use shareport_core::result::AppResult;
use shareport_core::traits::ShareGateway;
use shareport_core::types::{CreateShareRequest, ShareLink, ShareRecord};

/// In-memory gateway that replays scripted probe outcomes and records
/// every call it receives.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    /// Queued probe outcomes; an empty queue answers "available".
    probes: Mutex<VecDeque<AppResult<bool>>>,
    /// Links probed, in order.
    probed: Mutex<Vec<String>>,
    /// Requests submitted, in order.
    submissions: Mutex<Vec<CreateShareRequest>>,
}

impl ScriptedGateway {
    /// Create a gateway with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one probe outcome.
    pub fn push_probe(&self, outcome: AppResult<bool>) {
        self.probes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    /// Queue a sequence of availability answers.
    pub fn script_probes(&self, outcomes: &[bool]) {
        for outcome in outcomes {
            self.push_probe(Ok(*outcome));
        }
    }

    /// Links probed so far.
    pub fn probed_links(&self) -> Vec<String> {
        self.probed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Requests submitted so far.
    pub fn submissions(&self) -> Vec<CreateShareRequest> {
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ShareGateway for ScriptedGateway {
    async fn is_link_available(&self, link: &ShareLink) -> AppResult<bool> {
        self.probed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(link.to_string());
        self.probes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn create_share(&self, request: &CreateShareRequest) -> AppResult<ShareRecord> {
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        let now = Utc::now();
        Ok(ShareRecord {
            link: request.link.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            expires_at: request.expiration.deadline_from(now),
            created_at: now,
        })
    }
}
