use async_trait::async_trait;
use rcheckin::errors::{AppError, AppResult};
use rcheckin::models::action_target::ActionTarget;
use rcheckin::models::draft::SubmissionDraft;
use rcheckin::models::position::Position;
use rcheckin::models::submission::{SubmissionReceipt, SubmissionResult};
use rcheckin::services::backend::ActionBackend;
use rcheckin::services::geocoder::ReverseGeocoder;
use rcheckin::services::geolocation::Geolocator;
use rcheckin::services::notifier::{Notice, Notifier};
use rcheckin::services::page::Page;
use rcheckin::workflow::controller::{MSG_GEO_FAILED, MSG_GEO_UNSUPPORTED, MSG_SUCCESS, MSG_TRANSPORT};
use rcheckin::workflow::{ActionController, Enrichment, PointerTarget, Services};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ------------------------------------------------
// Fakes
// ------------------------------------------------

struct FakeGeolocator {
    available: bool,
    fix: Result<Position, String>,
    delay: Duration,
}

#[async_trait]
impl Geolocator for FakeGeolocator {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(&self) -> AppResult<Position> {
        tokio::time::sleep(self.delay).await;
        self.fix
            .clone()
            .map_err(AppError::PermissionOrTimeoutDenied)
    }
}

struct FakeGeocoder {
    answer: Result<Option<String>, String>,
    delay: Duration,
    calls: Mutex<Vec<Position>>,
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, pos: Position) -> AppResult<Option<String>> {
        self.calls.lock().unwrap().push(pos);
        tokio::time::sleep(self.delay).await;
        self.answer
            .clone()
            .map_err(AppError::EnrichmentLookupFailed)
    }
}

struct FakeBackend {
    replies: Mutex<VecDeque<AppResult<SubmissionResult>>>,
    calls: Mutex<Vec<(ActionTarget, SubmissionDraft)>>,
    delay: Duration,
}

#[async_trait]
impl ActionBackend for FakeBackend {
    async fn submit(
        &self,
        target: ActionTarget,
        draft: &SubmissionDraft,
    ) -> AppResult<SubmissionResult> {
        self.calls.lock().unwrap().push((target, draft.clone()));
        tokio::time::sleep(self.delay).await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(SubmissionResult::Success))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
struct RecordingPage {
    refreshed: Mutex<Vec<SubmissionReceipt>>,
}

impl Page for RecordingPage {
    fn refresh(&self, receipt: &SubmissionReceipt) -> AppResult<()> {
        self.refreshed.lock().unwrap().push(receipt.clone());
        Ok(())
    }
}

// ------------------------------------------------
// Harness
// ------------------------------------------------

struct Harness {
    controller: ActionController,
    geocoder: Arc<FakeGeocoder>,
    backend: Arc<FakeBackend>,
    notifier: Arc<RecordingNotifier>,
    page: Arc<RecordingPage>,
}

struct Setup {
    geo_available: bool,
    fix: Result<Position, String>,
    geo_delay: Duration,
    lookup: Result<Option<String>, String>,
    lookup_delay: Duration,
    replies: Vec<AppResult<SubmissionResult>>,
    backend_delay: Duration,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            geo_available: true,
            fix: Ok(Position {
                latitude: 12.34,
                longitude: 56.78,
            }),
            geo_delay: Duration::ZERO,
            lookup: Ok(Some("123 Main St".to_string())),
            lookup_delay: Duration::ZERO,
            replies: Vec::new(),
            backend_delay: Duration::ZERO,
        }
    }
}

impl Setup {
    fn build(self) -> Harness {
        let geocoder = Arc::new(FakeGeocoder {
            answer: self.lookup,
            delay: self.lookup_delay,
            calls: Mutex::new(Vec::new()),
        });
        let backend = Arc::new(FakeBackend {
            replies: Mutex::new(self.replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: self.backend_delay,
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let page = Arc::new(RecordingPage::default());

        let controller = ActionController::new(Services {
            geolocator: Arc::new(FakeGeolocator {
                available: self.geo_available,
                fix: self.fix,
                delay: self.geo_delay,
            }),
            geocoder: geocoder.clone(),
            backend: backend.clone(),
            notifier: notifier.clone(),
            page: page.clone(),
        });

        Harness {
            controller,
            geocoder,
            backend,
            notifier,
            page,
        }
    }
}

impl Harness {
    fn notices(&self) -> Vec<Notice> {
        self.notifier.notices.lock().unwrap().clone()
    }

    fn backend_calls(&self) -> usize {
        self.backend.calls.lock().unwrap().len()
    }
}

// ------------------------------------------------
// Trigger activation and dismissal
// ------------------------------------------------

#[test]
fn test_activation_binds_title_and_destination_together() {
    let h = Setup::default().build();
    let c = &h.controller;

    assert!(!c.is_visible());
    assert_eq!(c.title(), "");
    assert_eq!(c.destination(), None);

    c.activate(ActionTarget::CheckIn);
    assert!(c.is_visible());
    assert_eq!(c.title(), "Check In");
    assert_eq!(c.destination(), Some("/staff/login"));

    // re-entrant while visible
    c.activate(ActionTarget::CheckOut);
    assert!(c.is_visible());
    assert_eq!(c.title(), "Check Out");
    assert_eq!(c.destination(), Some("/staff/logout"));
}

#[test]
fn test_backdrop_click_closes_but_content_click_does_not() {
    let h = Setup::default().build();
    let c = &h.controller;

    c.activate(ActionTarget::CheckIn);
    assert!(!c.pointer_down(PointerTarget::Content));
    assert!(c.is_visible());

    assert!(c.pointer_down(PointerTarget::Backdrop));
    assert!(!c.is_visible());
}

#[test]
fn test_dismissing_hidden_modal_is_noop() {
    let h = Setup::default().build();
    let c = &h.controller;

    assert!(!c.close());
    c.activate(ActionTarget::CheckOut);
    assert!(c.close());
    assert!(!c.close());
    assert!(!c.pointer_down(PointerTarget::Backdrop));
    assert!(!c.is_visible());
    assert_eq!(h.backend_calls(), 0);
}

#[test]
fn test_dismissal_keeps_draft() {
    let h = Setup::default().build();
    let c = &h.controller;

    c.activate(ActionTarget::CheckIn);
    c.edit_draft(|d| d.set_location("Front desk"));
    c.close();

    assert_eq!(c.draft().location.as_deref(), Some("Front desk"));
    assert_eq!(h.backend_calls(), 0);
}

// ------------------------------------------------
// Geolocation enrichment
// ------------------------------------------------

#[tokio::test]
async fn test_enrichment_writes_resolved_address() {
    let h = Setup::default().build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let out = c.enrich_location().await.unwrap();
    assert!(matches!(out, Enrichment::Applied { resolved: true, .. }));

    let d = c.draft();
    assert_eq!(d.latitude, Some(12.34));
    assert_eq!(d.longitude, Some(56.78));
    assert_eq!(d.location.as_deref(), Some("123 Main St"));
}

#[tokio::test]
async fn test_enrichment_falls_back_when_lookup_fails() {
    let h = Setup {
        lookup: Err("service down".into()),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    c.enrich_location().await.unwrap();
    assert_eq!(c.draft().location.as_deref(), Some("Lat: 12.34, Lng: 56.78"));
    // lookup failure is not surfaced as a notice
    assert!(h.notices().is_empty());
}

#[tokio::test]
async fn test_enrichment_falls_back_when_lookup_has_no_name() {
    let h = Setup {
        lookup: Ok(None),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckOut);

    let out = c.enrich_location().await.unwrap();
    assert!(matches!(out, Enrichment::Applied { resolved: false, .. }));
    assert_eq!(c.draft().location.as_deref(), Some("Lat: 12.34, Lng: 56.78"));
}

#[tokio::test]
async fn test_enrichment_without_capability_writes_nothing() {
    let h = Setup {
        geo_available: false,
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let err = c.enrich_location().await.unwrap_err();
    assert!(matches!(err, AppError::CapabilityUnavailable));
    assert_eq!(c.draft().coordinates(), None);
    assert_eq!(
        h.notices(),
        vec![Notice::Warning(MSG_GEO_UNSUPPORTED.to_string())]
    );
}

#[tokio::test]
async fn test_enrichment_position_failure_writes_nothing() {
    let h = Setup {
        fix: Err("permission denied".into()),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let err = c.enrich_location().await.unwrap_err();
    assert!(matches!(err, AppError::PermissionOrTimeoutDenied(_)));
    assert_eq!(c.draft().coordinates(), None);
    assert_eq!(c.draft().location, None);
    assert_eq!(h.notices(), vec![Notice::Error(MSG_GEO_FAILED.to_string())]);
    assert!(h.geocoder.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_enrichment_requires_open_modal() {
    let h = Setup::default().build();
    let err = h.controller.enrich_location().await.unwrap_err();
    assert!(matches!(err, AppError::NoActiveTarget));
}

#[tokio::test]
async fn test_enrichment_discarded_when_closed_during_fix() {
    let h = Setup {
        geo_delay: Duration::from_millis(500),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let (out, _) = tokio::join!(c.enrich_location(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        c.close();
    });

    assert_eq!(out.unwrap(), Enrichment::Discarded);
    assert!(!c.is_visible());
    assert_eq!(c.draft().coordinates(), None);
    assert!(h.geocoder.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_late_address_after_dismissal_is_dropped() {
    let h = Setup {
        lookup_delay: Duration::from_millis(500),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let (out, _) = tokio::join!(c.enrich_location(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        c.close();
    });

    assert_eq!(out.unwrap(), Enrichment::Discarded);
    // coordinates were written before the lookup was issued
    assert_eq!(c.draft().latitude, Some(12.34));
    assert_eq!(c.draft().location, None);
    assert!(!c.is_visible());
}

#[tokio::test]
async fn test_rebinding_during_enrichment_keeps_lifetime() {
    let h = Setup {
        geo_delay: Duration::from_millis(50),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let (out, _) = tokio::join!(c.enrich_location(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        c.activate(ActionTarget::CheckOut);
    });

    assert!(matches!(out.unwrap(), Enrichment::Applied { .. }));
    assert_eq!(c.title(), "Check Out");
    assert_eq!(c.draft().location.as_deref(), Some("123 Main St"));
}

// ------------------------------------------------
// Submission
// ------------------------------------------------

#[tokio::test]
async fn test_successful_submission_hides_modal_and_refreshes() {
    let h = Setup::default().build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);
    c.edit_draft(|d| d.set_location("Front desk"));

    let res = c.submit().await.unwrap();
    assert_eq!(res, SubmissionResult::Success);
    assert!(!c.is_visible());
    assert_eq!(h.notices(), vec![Notice::Success(MSG_SUCCESS.to_string())]);

    let calls = h.backend.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ActionTarget::CheckIn);
    assert_eq!(calls[0].1.location.as_deref(), Some("Front desk"));

    let refreshed = h.page.refreshed.lock().unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].target, ActionTarget::CheckIn);
    assert_eq!(refreshed[0].draft.location.as_deref(), Some("Front desk"));

    // the draft is discarded once accepted
    assert_eq!(c.draft(), SubmissionDraft::default());
}

#[tokio::test]
async fn test_rejected_submission_keeps_modal_and_draft() {
    let h = Setup {
        replies: vec![Ok(SubmissionResult::Failure("X".into()))],
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckOut);
    c.edit_draft(|d| d.set_location("Warehouse"));

    let res = c.submit().await.unwrap();
    assert_eq!(res, SubmissionResult::Failure("X".into()));
    assert!(c.is_visible());
    assert_eq!(c.draft().location.as_deref(), Some("Warehouse"));

    let notices = h.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(&notices[0], Notice::Error(m) if m.contains("X")));
    assert!(h.page.refreshed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_retry_after_rejection_resends_same_draft() {
    let h = Setup {
        replies: vec![
            Ok(SubmissionResult::Failure("busy".into())),
            Ok(SubmissionResult::Success),
        ],
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);
    c.edit_draft(|d| d.set_field("note", "late train").unwrap());

    c.submit().await.unwrap();
    c.submit().await.unwrap();

    let calls = h.backend.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, calls[1].1);
    assert!(!c.is_visible());
}

#[tokio::test]
async fn test_transport_failure_keeps_modal_open() {
    let h = Setup {
        replies: vec![Err(AppError::TransportFailure("connection refused".into()))],
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let err = c.submit().await.unwrap_err();
    assert!(matches!(err, AppError::TransportFailure(_)));
    assert!(c.is_visible());
    assert!(!c.is_submitting());
    assert_eq!(h.notices(), vec![Notice::Error(MSG_TRANSPORT.to_string())]);
}

#[tokio::test]
async fn test_submit_without_open_modal_is_refused() {
    let h = Setup::default().build();
    let err = h.controller.submit().await.unwrap_err();
    assert!(matches!(err, AppError::NoActiveTarget));
    assert_eq!(h.backend_calls(), 0);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_refused() {
    let h = Setup {
        backend_delay: Duration::from_millis(200),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let (first, second) = tokio::join!(c.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(c.is_submitting());
        c.submit().await
    });

    assert_eq!(first.unwrap(), SubmissionResult::Success);
    assert!(matches!(second.unwrap_err(), AppError::SubmissionInFlight));
    assert_eq!(h.backend_calls(), 1);
    assert!(!c.is_submitting());
}

#[tokio::test]
async fn test_success_after_dismissal_does_not_touch_new_lifetime() {
    let h = Setup {
        backend_delay: Duration::from_millis(200),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let (res, _) = tokio::join!(c.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        c.close();
        c.activate(ActionTarget::CheckOut);
        c.edit_draft(|d| d.set_location("Dock 4"));
    });

    assert_eq!(res.unwrap(), SubmissionResult::Success);
    assert!(c.is_visible());
    assert_eq!(c.title(), "Check Out");
    assert_eq!(c.draft().location.as_deref(), Some("Dock 4"));
}

#[tokio::test]
async fn test_dropped_submission_releases_in_flight_flag() {
    let h = Setup {
        backend_delay: Duration::from_millis(200),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), c.submit()).await;
    assert!(timed_out.is_err());
    assert!(!c.is_submitting());

    assert_eq!(c.submit().await.unwrap(), SubmissionResult::Success);
    assert_eq!(h.backend_calls(), 2);
}

#[tokio::test]
async fn test_accepted_draft_is_gone_after_dismissal_and_reopen() {
    let h = Setup {
        backend_delay: Duration::from_millis(200),
        ..Setup::default()
    }
    .build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);
    c.edit_draft(|d| d.set_location("Gate 1"));

    let (res, _) = tokio::join!(c.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        c.close();
    });
    assert_eq!(res.unwrap(), SubmissionResult::Success);
    assert!(!c.is_visible());

    c.activate(ActionTarget::CheckOut);
    assert_eq!(c.draft(), SubmissionDraft::default());
    assert_eq!(h.page.refreshed.lock().unwrap().len(), 1);
}

// ------------------------------------------------
// Attachment
// ------------------------------------------------

#[tokio::test]
async fn test_unreadable_photo_stays_attached() {
    let h = Setup::default().build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let missing = std::env::temp_dir().join("rcheckin_missing_photo_for_test.jpg");
    let _ = std::fs::remove_file(&missing);

    assert!(!c.select_photo(missing.clone()).await);
    assert_eq!(c.draft().photo, Some(missing));

    c.submit().await.unwrap();
    assert_eq!(h.backend_calls(), 1);
}

#[tokio::test]
async fn test_readable_photo_is_confirmed() {
    let h = Setup::default().build();
    let c = &h.controller;
    c.activate(ActionTarget::CheckIn);

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("selfie.jpg");
    std::fs::write(&photo, b"\xff\xd8\xff\xe0fake").unwrap();

    assert!(c.select_photo(photo.clone()).await);
    assert_eq!(c.draft().photo, Some(photo));
}
