//! End-to-end workflow scenarios driven through the engine services.

use assert_matches::assert_matches;
use recolour_core::error::StoreError;
use recolour_core::roles::Role;
use recolour_core::sorting::{SortKey, SortOrder, TicketSort};
use recolour_core::workflow::{Priority, TicketStatus, WorkflowAction};
use recolour_db::models::ticket::{CreateTicket, HistoryEventType, TicketFilters, UpdateTicket};
use recolour_engine::{PhotoError, PhotoService, TicketService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PARTNER: &str = "Studio Alpha";

fn new_ticket(service: &mut TicketService) -> String {
    let input = CreateTicket {
        style: "Night Sky - AOP White Dots".into(),
        priority: Priority::Urgent,
        partner: PARTNER.into(),
        instructions: vec!["Keep clipping path".into(), "Night Sky".into()],
        reference_photos: None,
    };
    service.create(input, "manager").id
}

fn partner() -> Role {
    Role::Partner(PARTNER.into())
}

/// Drive a ticket from Pending to In Progress the way the roles would.
fn start_work(service: &mut TicketService, id: &str) {
    let partner = partner().actor_label();
    service.change_status(id, TicketStatus::Sent, "manager", None).unwrap();
    service.change_status(id, TicketStatus::Received, &partner, None).unwrap();
    service.change_status(id, TicketStatus::InProgress, &partner, None).unwrap();
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_ends_approved_with_six_history_entries() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);

    start_work(&mut service, &id);
    service
        .change_status(&id, TicketStatus::Completed, PARTNER, None)
        .unwrap();
    let ticket = service
        .change_status(&id, TicketStatus::Approved, "manager", None)
        .unwrap();

    assert_eq!(ticket.status, TicketStatus::Approved);
    let kinds: Vec<HistoryEventType> = ticket.history.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            HistoryEventType::Created,
            HistoryEventType::StatusChanged,
            HistoryEventType::StatusChanged,
            HistoryEventType::StatusChanged,
            HistoryEventType::StatusChanged,
            HistoryEventType::StatusChanged,
        ]
    );
    assert_eq!(ticket.history[2].actor, PARTNER);

    // Approved tickets leave the queue and show up in the library.
    let queue = service.list(TicketFilters::default(), &TicketSort::default(), &Role::Manager);
    assert!(queue.data.is_empty());
    let library = service.list_approved(&partner());
    assert_eq!(library.data.len(), 1);
    assert_eq!(library.data[0].approved_date, Some(ticket.updated_at));
}

#[test]
fn second_send_is_an_invalid_transition() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);

    service
        .change_status(&id, TicketStatus::Sent, "manager", None)
        .unwrap();
    let before = service.repo().get_by_id(&id).unwrap().history.len();

    assert_matches!(
        service.change_status(&id, TicketStatus::Sent, "manager", None),
        Err(StoreError::InvalidTransition {
            from: TicketStatus::Sent,
            to: TicketStatus::Sent
        })
    );
    assert_eq!(service.repo().get_by_id(&id).unwrap().history.len(), before);
}

#[test]
fn every_edge_outside_the_graph_is_rejected() {
    for from in TicketStatus::ALL {
        for to in TicketStatus::ALL {
            if recolour_core::workflow::can_transition(from, to) {
                continue;
            }
            let mut service = TicketService::default();
            let id = new_ticket(&mut service);
            // Walk the ticket to `from` along legal edges.
            let path: &[TicketStatus] = match from {
                TicketStatus::Pending => &[],
                TicketStatus::Sent => &[TicketStatus::Sent],
                TicketStatus::Received => &[TicketStatus::Sent, TicketStatus::Received],
                TicketStatus::InProgress => &[TicketStatus::Sent, TicketStatus::InProgress],
                TicketStatus::Completed => &[
                    TicketStatus::Sent,
                    TicketStatus::InProgress,
                    TicketStatus::Completed,
                ],
                TicketStatus::Approved => &[
                    TicketStatus::Sent,
                    TicketStatus::InProgress,
                    TicketStatus::Completed,
                    TicketStatus::Approved,
                ],
            };
            for step in path {
                service.change_status(&id, *step, "test", None).unwrap();
            }
            let before = service.repo().get_by_id(&id).unwrap().clone();
            assert_matches!(
                service.change_status(&id, to, "test", None),
                Err(StoreError::InvalidTransition { .. }),
                "{from} -> {to}"
            );
            assert_eq!(service.repo().get_by_id(&id).unwrap(), &before);
        }
    }
}

#[test]
fn rejected_ticket_cycles_back_and_reports_final_approval() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);
    let to_completed = [
        TicketStatus::Sent,
        TicketStatus::InProgress,
        TicketStatus::Completed,
    ];

    for step in to_completed {
        service.change_status(&id, step, "test", None).unwrap();
    }
    let rejected = service
        .change_status(&id, TicketStatus::Pending, "manager", Some("Shade too dark".into()))
        .unwrap();
    assert_eq!(rejected.history.last().unwrap().reason.as_deref(), Some("Shade too dark"));

    // Rejected tickets are Pending again, so the partner loses sight of them.
    assert!(service.find_by_id(&id, &partner()).is_none());

    for step in to_completed {
        service.change_status(&id, step, "test", None).unwrap();
    }
    let approved = service
        .change_status(&id, TicketStatus::Approved, "manager", None)
        .unwrap();

    let library = service.list_approved(&Role::Manager);
    assert_eq!(library.data[0].approved_date, Some(approved.updated_at));
    assert_eq!(approved.history.len(), 1 + 3 + 1 + 3 + 1);
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

#[test]
fn repeated_identical_update_is_idempotent() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);
    let update = || UpdateTicket {
        style: Some("Hedge Green - solid".into()),
        priority: Some(Priority::Low),
        ..UpdateTicket::default()
    };

    let first = service.update(&id, update(), "manager").unwrap();
    assert_eq!(first.history.len(), 3);

    let second = service.update(&id, update(), "manager").unwrap();
    assert_eq!(second.history.len(), 3);
    assert_eq!(second.updated_at, first.updated_at);
}

#[test]
fn updating_every_field_records_six_entries_in_declaration_order() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);
    let photos = recolour_core::catalog::catalog_photos(&[0, 1]);

    let update = UpdateTicket {
        partner_photos: Some(vec![photos[1].clone()]),
        reference_photos: Some(vec![photos[0].clone()]),
        instructions: Some(vec!["Match swatch".into()]),
        partner: Some("Studio Beta".into()),
        priority: Some(Priority::Medium),
        style: Some("Granita - solid".into()),
    };
    let ticket = service.update(&id, update, "operator").unwrap();

    let edits: Vec<(&str, &str, &str)> = ticket
        .history
        .iter()
        .filter(|e| e.kind == HistoryEventType::Edited)
        .map(|e| {
            (
                e.field.map(|f| f.as_str()).unwrap_or_default(),
                e.old_value.as_deref().unwrap_or_default(),
                e.new_value.as_deref().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        edits,
        vec![
            ("style", "Night Sky - AOP White Dots", "Granita - solid"),
            ("priority", "Urgent", "Medium"),
            ("partner", "Studio Alpha", "Studio Beta"),
            (
                "instructions",
                r#"["Keep clipping path","Night Sky"]"#,
                r#"["Match swatch"]"#
            ),
            ("referencePhotos", "(none)", "Photo 1"),
            ("partnerPhotos", "(none)", "Photo 2"),
        ]
    );
    assert!(ticket.history.iter().skip(1).all(|e| e.actor == "operator"));
}

// ---------------------------------------------------------------------------
// Visibility and listing
// ---------------------------------------------------------------------------

#[test]
fn partner_sees_ticket_only_once_sent() {
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);
    let stranger = Role::Partner("Studio Beta".into());

    let list = |service: &TicketService, role: &Role| {
        service
            .list(TicketFilters::default(), &TicketSort::default(), role)
            .data
            .len()
    };

    assert!(service.find_by_id(&id, &partner()).is_none());
    assert_eq!(list(&service, &partner()), 0);

    service
        .change_status(&id, TicketStatus::Sent, "manager", None)
        .unwrap();

    let view = service.find_by_id(&id, &partner()).unwrap();
    assert_eq!(
        view.available_actions,
        Some(vec![WorkflowAction::Receive, WorkflowAction::Start])
    );
    assert_eq!(list(&service, &partner()), 1);
    assert!(service.find_by_id(&id, &stranger).is_none());
    assert_eq!(list(&service, &stranger), 0);
}

#[test]
fn list_filters_and_sorts_queue() {
    let mut service = TicketService::default();
    let first = new_ticket(&mut service);
    let second = service
        .create(
            CreateTicket {
                style: "Granita - solid".into(),
                priority: Priority::Low,
                partner: "studio beta".into(),
                instructions: vec!["Keep clipping path".into()],
                reference_photos: None,
            },
            "operator",
        )
        .id;

    let by_partner = service.list(
        TicketFilters::default(),
        &TicketSort::new(SortKey::Partner, SortOrder::Asc),
        &Role::Operator,
    );
    let ids: Vec<&str> = by_partner.data.iter().map(|v| v.ticket.id.as_str()).collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);

    let urgent = service.list(
        TicketFilters {
            priority: Some(Priority::Urgent),
            ..TicketFilters::default()
        },
        &TicketSort::default(),
        &Role::Operator,
    );
    assert_eq!(urgent.data.len(), 1);
    assert_eq!(urgent.data[0].ticket.id, first);
    assert_eq!(
        urgent.data[0].available_actions,
        Some(vec![WorkflowAction::Send])
    );
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photo_upload_attaches_through_update() {
    let dir = tempfile::tempdir().unwrap();
    let photos = PhotoService::new(dir.path());
    let mut service = TicketService::default();
    let id = new_ticket(&mut service);
    start_work(&mut service, &id);

    let gif = photos.upload(&id, b"img", b"thumb", "loop.gif").await;
    assert_matches!(
        gif,
        Err(PhotoError::UnsupportedFileType { ref extension, .. }) if extension == ".gif"
    );

    let first = photos.upload(&id, b"img", b"thumb", "front.jpg").await.unwrap();
    let second = photos.upload(&id, b"img", b"thumb", "back.jpg").await.unwrap();
    assert_ne!(first.id, second.id);

    let ticket = service
        .update(
            &id,
            UpdateTicket::partner_photos(vec![first.clone(), second.clone()]),
            PARTNER,
        )
        .unwrap();
    let last = ticket.history.last().unwrap();
    assert_eq!(last.new_value.as_deref(), Some("front.jpg, back.jpg"));
    assert_eq!(ticket.partner_photos.len(), 2);

    photos.delete_files(&id, &first.file_name).await;
    let ticket = service
        .update(&id, UpdateTicket::partner_photos(vec![second]), PARTNER)
        .unwrap();
    assert_eq!(
        ticket.history.last().unwrap().old_value.as_deref(),
        Some("front.jpg, back.jpg")
    );
    assert!(!dir.path().join(&id).join(&first.file_name).exists());
}

#[tokio::test]
async fn files_written_before_failed_attach_are_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let photos = PhotoService::new(dir.path());
    let mut service = TicketService::default();

    // Files are written first; attaching to a ticket that no longer exists
    // fails and leaves the upload orphaned on disk.
    let photo = photos.upload("42", b"img", b"thumb", "orphan.png").await.unwrap();
    let result = service.update("42", UpdateTicket::partner_photos(vec![photo.clone()]), PARTNER);

    assert_matches!(result, Err(StoreError::NotFound { .. }));
    assert!(dir.path().join("42").join(&photo.file_name).exists());
    assert!(dir
        .path()
        .join("42")
        .join("thumbnails")
        .join(&photo.file_name)
        .exists());
}
