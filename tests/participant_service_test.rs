//! Integration tests for the participant service

mod helpers;

use assert_matches::assert_matches;
use event_desk::services::ErrorCode;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use helpers::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_create_then_get_participant() {
    let Some(ctx) = setup_test().await else { return };
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    let created = ctx.services.participant_service.create_participant(&name, &email).await;
    assert!(created.is_success());
    assert_eq!(created.message.as_deref(), Some("Participant created successfully."));
    let payload = created.payload.expect("payload");
    assert!(payload.created);

    let participant = ctx
        .services
        .participant_service
        .get_participant(payload.participant_id)
        .await
        .payload
        .expect("payload")
        .participant;
    assert_eq!(participant.name, name);
    assert_eq!(participant.email, email);
}

#[tokio::test]
#[serial]
async fn test_same_email_reuses_existing_participant() {
    let Some(ctx) = setup_test().await else { return };
    let service = &ctx.services.participant_service;

    let first = service.create_participant("Alice", "alice@example.com").await;
    let second = service.create_participant("Alice Again", " alice@example.com ").await;

    assert!(second.is_success());
    assert_eq!(
        second.message.as_deref(),
        Some("Participant already registered with this email.")
    );
    let first = first.payload.expect("payload");
    let second = second.payload.expect("payload");
    assert_eq!(first.participant_id, second.participant_id);
    assert!(!second.created);

    assert_eq!(ctx.counts().await.participants, 1);
    let stored = ctx
        .db
        .participants
        .find_by_email("alice@example.com")
        .await
        .expect("query")
        .expect("participant");
    assert_eq!(stored.name, "Alice");
}

#[tokio::test]
#[serial]
async fn test_concurrent_creates_with_same_email_store_one_row() {
    let Some(ctx) = setup_test().await else { return };
    let service = &ctx.services.participant_service;

    let (a, b) = tokio::join!(
        service.create_participant("Racer One", "race@example.com"),
        service.create_participant("Racer Two", "race@example.com"),
    );

    assert!(a.is_success());
    assert!(b.is_success());
    let a = a.payload.expect("payload");
    let b = b.payload.expect("payload");
    assert_eq!(a.participant_id, b.participant_id);
    assert!(a.created != b.created);
    assert_eq!(ctx.counts().await.participants, 1);
}

#[tokio::test]
#[serial]
async fn test_create_rejects_invalid_fields() {
    let Some(ctx) = setup_test().await else { return };
    let service = &ctx.services.participant_service;

    let response = service.create_participant("", "not-an-email").await;
    assert_matches!(response.code, Some(ErrorCode::Validation));
    let errors = response.field_errors();
    assert_eq!(errors.get("nom").map(String::as_str), Some("Name is required."));
    assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email format."));

    let missing = service.create_participant("Bob", "").await;
    assert_eq!(
        missing.field_errors().get("email").map(String::as_str),
        Some("Email is required.")
    );

    assert_eq!(ctx.counts().await.participants, 0);
}

#[tokio::test]
#[serial]
async fn test_get_all_participants_orders_by_name() {
    let Some(ctx) = setup_test().await else { return };
    let zoe = ctx.participant("Zoe", "zoe@example.com").await;
    let adam = ctx.participant("Adam", "adam@example.com").await;
    let mia = ctx.participant("Mia", "mia@example.com").await;

    let response = ctx.services.participant_service.get_all_participants().await;
    let ids: Vec<i64> = response
        .payload
        .expect("payload")
        .participants
        .iter()
        .map(|participant| participant.id)
        .collect();
    assert_eq!(ids, vec![adam, mia, zoe]);
}

#[tokio::test]
#[serial]
async fn test_update_participant_changes_name_and_email() {
    let Some(ctx) = setup_test().await else { return };
    let id = ctx.participant("Alice", "alice@example.com").await;

    let same_email = ctx
        .services
        .participant_service
        .update_participant(id, "Alice Liddell", "alice@example.com")
        .await;
    assert!(same_email.is_success());
    assert_eq!(same_email.payload.expect("payload").participant.name, "Alice Liddell");

    let new_email = ctx
        .services
        .participant_service
        .update_participant(id, "Alice Liddell", "liddell@example.com")
        .await;
    assert!(new_email.is_success());
    assert_eq!(new_email.message.as_deref(), Some("Participant updated successfully."));
    assert_eq!(new_email.payload.expect("payload").participant.email, "liddell@example.com");
}

#[tokio::test]
#[serial]
async fn test_update_to_taken_email_is_conflict_and_leaves_record() {
    let Some(ctx) = setup_test().await else { return };
    ctx.participant("Alice", "alice@example.com").await;
    let bob = ctx.participant("Bob", "bob@example.com").await;

    let response = ctx
        .services
        .participant_service
        .update_participant(bob, "Bobby", "alice@example.com")
        .await;
    assert_matches!(response.code, Some(ErrorCode::Conflict));
    assert_eq!(
        response.field_errors().get("email").map(String::as_str),
        Some("This email is already used by another participant.")
    );

    let stored = ctx
        .services
        .participant_service
        .get_participant(bob)
        .await
        .payload
        .expect("payload")
        .participant;
    assert_eq!(stored.name, "Bob");
    assert_eq!(stored.email, "bob@example.com");
}

#[tokio::test]
#[serial]
async fn test_missing_participant_is_not_found() {
    let Some(ctx) = setup_test().await else { return };
    let service = &ctx.services.participant_service;

    let fetched = service.get_participant(42).await;
    assert_matches!(fetched.code, Some(ErrorCode::NotFound));
    assert_eq!(fetched.message.as_deref(), Some("Participant not found."));

    let updated = service.update_participant(42, "Ghost", "ghost@example.com").await;
    assert_matches!(updated.code, Some(ErrorCode::NotFound));

    let deleted = service.delete_participant(42).await;
    assert_matches!(deleted.code, Some(ErrorCode::NotFound));
}

#[tokio::test]
#[serial]
async fn test_delete_participant_cascades_to_inscriptions() {
    let Some(ctx) = setup_test().await else { return };
    let first = ctx.event("First", "2030-03-01").await;
    let second = ctx.event("Second", "2030-04-01").await;
    let alice = ctx.participant("Alice", "alice@example.com").await;
    let bob = ctx.participant("Bob", "bob@example.com").await;
    ctx.inscription(first, alice).await;
    ctx.inscription(second, alice).await;
    ctx.inscription(first, bob).await;

    let response = ctx.services.participant_service.delete_participant(alice).await;
    assert!(response.is_success());
    assert_eq!(response.payload.expect("payload").inscriptions_removed, 2);

    let by_participant = ctx
        .services
        .inscription_service
        .get_inscriptions_by_participant(alice)
        .await;
    assert_matches!(by_participant.code, Some(ErrorCode::NotFound));

    let counts = ctx.counts().await;
    assert_eq!(counts.events, 2);
    assert_eq!(counts.participants, 1);
    assert_eq!(counts.inscriptions, 1);
}

#[tokio::test]
#[serial]
async fn test_email_letter_case_identifies_same_participant() {
    let Some(ctx) = setup_test().await else { return };
    let service = &ctx.services.participant_service;

    let first = service.create_participant("Alice", "alice@example.com").await;
    let second = service.create_participant("Alice", "Alice@Example.COM").await;

    let first = first.payload.expect("payload");
    let second = second.payload.expect("payload");
    assert_eq!(second.participant_id, first.participant_id);
    assert!(!second.created);
    assert_eq!(ctx.counts().await.participants, 1);

    let found = ctx
        .db
        .participants
        .find_by_email("ALICE@example.com")
        .await
        .expect("query")
        .expect("participant");
    assert_eq!(found.id, first.participant_id);
    assert_eq!(found.email, "alice@example.com");
}

#[tokio::test]
#[serial]
async fn test_update_to_case_variant_of_taken_email_is_conflict() {
    let Some(ctx) = setup_test().await else { return };
    ctx.participant("Alice", "alice@example.com").await;
    let bob = ctx.participant("Bob", "bob@example.com").await;

    let response = ctx
        .services
        .participant_service
        .update_participant(bob, "Bob", "ALICE@example.com")
        .await;
    assert_matches!(response.code, Some(ErrorCode::Conflict));
    assert!(response.field_errors().contains_key("email"));

    let own_case_change = ctx
        .services
        .participant_service
        .update_participant(bob, "Bob", "Bob@Example.com")
        .await;
    assert!(own_case_change.is_success());
    assert_eq!(own_case_change.payload.expect("payload").participant.email, "Bob@Example.com");
    assert_eq!(ctx.counts().await.participants, 2);
}
