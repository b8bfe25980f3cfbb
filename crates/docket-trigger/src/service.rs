use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use docket_store::ArtefactStore;
use docket_types::Artefact;

use crate::error::TriggerResult;
use crate::notify::{CreatedNotice, ReportingClient, SubscriptionNotifier};

/// Evaluates trigger eligibility and fans publications out to subscribers.
pub struct ArtefactTriggerService {
    store: Arc<dyn ArtefactStore>,
    notifier: Arc<dyn SubscriptionNotifier>,
    reporting: Arc<dyn ReportingClient>,
}

impl ArtefactTriggerService {
    pub fn new(
        store: Arc<dyn ArtefactStore>,
        notifier: Arc<dyn SubscriptionNotifier>,
        reporting: Arc<dyn ReportingClient>,
    ) -> Self {
        Self {
            store,
            notifier,
            reporting,
        }
    }

    /// Post-commit path: fire a creation notice if the artefact's display
    /// window is already open on `today`.
    ///
    /// NoMatch artefacts are never distributed. Returns whether a notice
    /// was dispatched.
    pub fn evaluate_new(&self, artefact: &Artefact, today: NaiveDate) -> TriggerResult<bool> {
        if artefact.location_id.is_no_match() {
            debug!(artefact = %artefact.artefact_id, "unresolved location, not distributed");
            return Ok(false);
        }
        if !artefact.is_trigger_eligible(today) {
            debug!(
                artefact = %artefact.artefact_id,
                display_from = %artefact.display_from,
                "window not open yet"
            );
            return Ok(false);
        }

        self.notifier
            .notify_created(&CreatedNotice::new(artefact.clone(), today))?;
        info!(artefact = %artefact.artefact_id, "creation notice dispatched");
        Ok(true)
    }

    /// Daily path: notify for artefacts whose display window opens today.
    ///
    /// Catches lists ingested ahead of their window, which become active
    /// purely from wall-clock advance. Returns the number of dispatched
    /// notices.
    pub fn sweep_newly_active(&self, today: NaiveDate) -> TriggerResult<usize> {
        let mut dispatched = 0;
        for artefact in self.store.find_by_display_from(today)? {
            if self.evaluate_new(&artefact, today)? {
                dispatched += 1;
            }
        }
        info!(count = dispatched, %today, "newly-active sweep complete");
        Ok(dispatched)
    }

    /// Periodic path: batch every NoMatch artefact and forward the batch to
    /// operator reporting. An empty batch sends nothing.
    pub fn sweep_no_match(&self) -> TriggerResult<usize> {
        let unresolved = self.store.find_all_no_match()?;
        if unresolved.is_empty() {
            return Ok(0);
        }
        self.reporting.report_no_match(&unresolved)?;
        info!(count = unresolved.len(), "unresolved locations reported");
        Ok(unresolved.len())
    }
}
