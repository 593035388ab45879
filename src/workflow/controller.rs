//! The action workflow controller: modal lifecycle, geolocation enrichment,
//! form submission and result handling.
//!
//! State lives behind a mutex that is never held across an `.await`, so
//! user actions (close, edit, rebind) can interleave with pending
//! enrichment or submission futures.

use super::modal::{Modal, PointerTarget};
use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::models::draft::SubmissionDraft;
use crate::models::position::Position;
use crate::models::submission::{SubmissionReceipt, SubmissionResult};
use crate::services::attachment;
use crate::services::backend::ActionBackend;
use crate::services::geocoder::ReverseGeocoder;
use crate::services::geolocation::Geolocator;
use crate::services::notifier::{Notice, Notifier};
use crate::services::page::Page;
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

pub const MSG_GEO_UNSUPPORTED: &str = "Geolocation is not supported by this device.";
pub const MSG_GEO_FAILED: &str = "Unable to get your location. Please enter it manually.";
pub const MSG_SUCCESS: &str = "Action completed successfully!";
pub const MSG_TRANSPORT: &str = "An error occurred. Please try again.";
pub const MSG_IN_FLIGHT: &str = "A submission is already in progress. Please wait.";

/// Result of a completed enrichment step.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    /// Coordinates and location text were written into the draft.
    Applied {
        position: Position,
        location: String,
        resolved: bool,
    },
    /// The modal was dismissed before the step finished; nothing was written
    /// after the dismissal.
    Discarded,
}

#[derive(Debug, Default)]
struct State {
    modal: Modal,
    draft: SubmissionDraft,
    in_flight: bool,
}

/// Clears the in-flight flag when dropped, including when the pending
/// submission future is dropped before completing.
struct InFlight<'a>(&'a Mutex<State>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(|p| p.into_inner()).in_flight = false;
    }
}

/// Collaborators the controller talks to.
pub struct Services {
    pub geolocator: Arc<dyn Geolocator>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub backend: Arc<dyn ActionBackend>,
    pub notifier: Arc<dyn Notifier>,
    pub page: Arc<dyn Page>,
}

pub struct ActionController {
    state: Mutex<State>,
    services: Services,
}

impl ActionController {
    pub fn new(services: Services) -> Self {
        Self {
            state: Mutex::new(State::default()),
            services,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn notify(&self, notice: Notice) {
        self.services.notifier.notify(notice);
    }

    // ------------------------------------------------
    // Modal lifecycle
    // ------------------------------------------------

    /// Bind `target` (title and destination together) and show the modal.
    pub fn activate(&self, target: ActionTarget) {
        let mut st = self.state();
        st.modal.open(target);
        debug!(title = target.title(), endpoint = target.endpoint(), "modal opened");
    }

    /// Explicit close control. Never touches the draft.
    pub fn close(&self) -> bool {
        let hidden = self.state().modal.hide();
        if hidden {
            debug!("modal closed");
        }
        hidden
    }

    /// Pointer activation anywhere on the page; only the backdrop closes.
    pub fn pointer_down(&self, at: PointerTarget) -> bool {
        let hidden = self.state().modal.pointer_down(at);
        if hidden {
            debug!("modal dismissed from backdrop");
        }
        hidden
    }

    pub fn is_visible(&self) -> bool {
        self.state().modal.is_visible()
    }

    pub fn title(&self) -> &'static str {
        self.state().modal.title()
    }

    pub fn destination(&self) -> Option<&'static str> {
        self.state().modal.destination()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().in_flight
    }

    // ------------------------------------------------
    // Draft
    // ------------------------------------------------

    pub fn draft(&self) -> SubmissionDraft {
        self.state().draft.clone()
    }

    /// Edit the draft in place, as a user typing into the form would.
    pub fn edit_draft<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut SubmissionDraft) -> T,
    {
        f(&mut self.state().draft)
    }

    /// Attach a photo, then read it once to confirm it is readable.
    /// A failed read is reported but the file stays attached.
    pub async fn select_photo(&self, path: PathBuf) -> bool {
        self.state().draft.attach_photo(&path);

        match attachment::probe(&path).await {
            Ok(_) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "selected photo is not readable");
                false
            }
        }
    }

    // ------------------------------------------------
    // Geolocation enrichment
    // ------------------------------------------------

    pub async fn enrich_location(&self) -> AppResult<Enrichment> {
        let lifetime = {
            let st = self.state();
            if !st.modal.is_visible() {
                return Err(AppError::NoActiveTarget);
            }
            st.modal.lifetime()
        };

        if !self.services.geolocator.is_available() {
            warn!("geolocation capability unavailable");
            self.notify(Notice::Warning(MSG_GEO_UNSUPPORTED.to_string()));
            return Err(AppError::CapabilityUnavailable);
        }

        let fix = tokio::select! {
            _ = lifetime.cancelled() => return Ok(Enrichment::Discarded),
            r = self.services.geolocator.current_position() => r,
        };

        let position = match fix {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "error getting location");
                if lifetime.is_cancelled() {
                    return Ok(Enrichment::Discarded);
                }
                self.notify(Notice::Error(MSG_GEO_FAILED.to_string()));
                return Err(if matches!(e, AppError::PermissionOrTimeoutDenied(_)) {
                    e
                } else {
                    AppError::PermissionOrTimeoutDenied(e.to_string())
                });
            }
        };

        {
            let mut st = self.state();
            if lifetime.is_cancelled() {
                return Ok(Enrichment::Discarded);
            }
            st.draft.set_coordinates(position);
        }

        let lookup = tokio::select! {
            _ = lifetime.cancelled() => return Ok(Enrichment::Discarded),
            r = self.services.geocoder.reverse(position) => r,
        };

        let (location, resolved) = match lookup {
            Ok(Some(name)) => (name, true),
            Ok(None) => {
                debug!(%position, "no address for position");
                (position.fallback_label(), false)
            }
            Err(e) => {
                error!(error = %e, "error getting address");
                (position.fallback_label(), false)
            }
        };

        let mut st = self.state();
        if lifetime.is_cancelled() {
            return Ok(Enrichment::Discarded);
        }
        st.draft.set_location(location.clone());

        Ok(Enrichment::Applied {
            position,
            location,
            resolved,
        })
    }

    // ------------------------------------------------
    // Submission
    // ------------------------------------------------

    pub async fn submit(&self) -> AppResult<SubmissionResult> {
        let (target, draft, lifetime) = {
            let mut st = self.state();
            let target = match (st.modal.is_visible(), st.modal.target()) {
                (true, Some(t)) => t,
                _ => return Err(AppError::NoActiveTarget),
            };
            if st.in_flight {
                drop(st);
                warn!("submit ignored: request already in flight");
                self.notify(Notice::Warning(MSG_IN_FLIGHT.to_string()));
                return Err(AppError::SubmissionInFlight);
            }
            st.in_flight = true;
            (target, st.draft.clone(), st.modal.lifetime())
        };

        let guard = InFlight(&self.state);
        let outcome = self.services.backend.submit(target, &draft).await;
        drop(guard);

        match outcome {
            Ok(SubmissionResult::Success) => {
                self.notify(Notice::Success(MSG_SUCCESS.to_string()));

                {
                    let mut st = self.state();
                    // a dismissal during flight already ended this lifetime;
                    // only a newer visible one keeps its draft
                    if !lifetime.is_cancelled() {
                        st.modal.hide();
                    }
                    if !lifetime.is_cancelled() || !st.modal.is_visible() {
                        st.draft = SubmissionDraft::default();
                    }
                }

                let receipt = SubmissionReceipt {
                    target,
                    draft,
                    accepted_at: Local::now(),
                };
                if let Err(e) = self.services.page.refresh(&receipt) {
                    warn!(error = %e, "page refresh failed");
                }
                Ok(SubmissionResult::Success)
            }
            Ok(SubmissionResult::Failure(msg)) => {
                warn!(action = target.kind_str(), error = %msg, "submission rejected");
                self.notify(Notice::Error(format!("Error: {}", msg)));
                Ok(SubmissionResult::Failure(msg))
            }
            Err(e) => {
                error!(error = %e, "submission failed");
                self.notify(Notice::Error(MSG_TRANSPORT.to_string()));
                Err(if matches!(e, AppError::TransportFailure(_)) {
                    e
                } else {
                    AppError::TransportFailure(e.to_string())
                })
            }
        }
    }
}
