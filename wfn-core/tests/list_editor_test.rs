mod common;

use common::{donation_json, donor_json, program_json, TestBackend, ACCESS_TOKEN};
use wfn_core::models::{Donation, DonationDraft, Donor, DonorDraft, Program};
use wfn_core::{Confirmation, Deletion, EditMode, EditorError, ListEditor};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn load_fetches_the_collection() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/donors/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([donor_json(1, "Asha"), donor_json(2, "Ravi")])),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let mut editor = ListEditor::<Donor>::new();
    editor.load(&api).await;

    assert_eq!(editor.items().len(), 2);
}

#[tokio::test]
async fn failed_load_keeps_the_current_list() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/donors/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let mut editor = ListEditor::<Donor>::new();
    editor.load(&api).await;

    assert!(editor.items().is_empty());
}

#[tokio::test]
async fn created_record_appears_exactly_once() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/donors/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(donor_json(3, "Meera")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let items: Vec<Donor> =
        serde_json::from_value(serde_json::json!([donor_json(1, "Asha"), donor_json(2, "Ravi")])).unwrap();
    let mut editor = ListEditor::from_items(items);
    editor.set_draft(DonorDraft {
        name: "Meera".into(),
        email: "meera@example.org".into(),
        phone: "98450 00000".into(),
        ..Default::default()
    });

    let saved = editor.submit(&api).await.expect("Submit failed");

    assert_eq!(saved.id, 3);
    assert_eq!(editor.items().iter().filter(|d| d.id == 3).count(), 1);
    assert_eq!(editor.items().len(), 3);
    assert_eq!(editor.draft(), &DonorDraft::default());
}

#[tokio::test]
async fn update_replaces_the_record_in_place() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("PUT"))
        .and(path("/api/donors/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(donor_json(2, "Ravi Kumar")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let items: Vec<Donor> =
        serde_json::from_value(serde_json::json!([donor_json(1, "Asha"), donor_json(2, "Ravi")])).unwrap();
    let mut editor = ListEditor::from_items(items);

    let mut draft = editor.begin_edit(2).cloned().unwrap();
    draft.name = "Ravi Kumar".into();
    editor.set_draft(draft);
    editor.submit(&api).await.expect("Submit failed");

    assert_eq!(editor.items().len(), 2);
    assert_eq!(editor.items()[1].name, "Ravi Kumar");
    assert_eq!(editor.mode(), EditMode::Create);
}

#[tokio::test]
async fn incomplete_draft_never_reaches_the_backend() {
    let backend = TestBackend::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let mut editor = ListEditor::<Donation>::new();
    let draft = DonationDraft {
        donor: "2".into(),
        amount: String::new(),
        date: "2024-03-09".into(),
        method: "Cash".into(),
        ..Default::default()
    };
    editor.set_draft(draft.clone());

    let err = editor.submit(&api).await.unwrap_err();

    assert!(matches!(err, EditorError::Validation(_)));
    assert_eq!(err.to_string(), "Please fill in all required fields.");
    assert_eq!(editor.draft(), &draft);
}

#[tokio::test]
async fn failed_submit_leaves_state_untouched() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/donors/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"email\":[\"invalid\"]}"))
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let items: Vec<Donor> = serde_json::from_value(serde_json::json!([donor_json(1, "Asha")])).unwrap();
    let mut editor = ListEditor::from_items(items);
    let draft = DonorDraft {
        name: "Meera".into(),
        email: "not-an-email".into(),
        phone: "1".into(),
        ..Default::default()
    };
    editor.set_draft(draft.clone());

    let err = editor.submit(&api).await.unwrap_err();

    assert!(matches!(err, EditorError::Api(_)));
    assert_eq!(editor.items().len(), 1);
    assert_eq!(editor.draft(), &draft);
}

#[tokio::test]
async fn confirmed_delete_removes_the_record() {
    let backend = TestBackend::spawn().await;
    Mock::given(method("DELETE"))
        .and(path("/api/programs/3/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let items: Vec<Program> = serde_json::from_value(serde_json::json!([
        program_json(3, "School kits"),
        program_json(4, "Relief")
    ]))
    .unwrap();
    let mut editor = ListEditor::from_items(items);

    let outcome = editor.delete(&api, 3, Confirmation::Confirmed).await.unwrap();

    assert_eq!(outcome, Deletion::Deleted);
    assert!(editor.find(3).is_none());
    assert_eq!(editor.items().len(), 1);
}

#[tokio::test]
async fn declined_delete_issues_no_request() {
    let backend = TestBackend::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&backend.server)
        .await;

    let api = backend.api.with_bearer(ACCESS_TOKEN);
    let items: Vec<Program> = serde_json::from_value(serde_json::json!([
        program_json(3, "School kits"),
        program_json(4, "Relief")
    ]))
    .unwrap();
    let mut editor = ListEditor::from_items(items.clone());

    let outcome = editor.delete(&api, 3, Confirmation::Declined).await.unwrap();

    assert_eq!(outcome, Deletion::Declined);
    assert_eq!(editor.items(), items.as_slice());
}

#[tokio::test]
async fn edit_then_cancel_leaves_donation_untouched() {
    let items: Vec<Donation> = serde_json::from_value(serde_json::json!([
        donation_json(7, donor_json(2, "Meera"), "250.00"),
        donation_json(8, serde_json::json!(2), "100.00")
    ]))
    .unwrap();
    let mut editor = ListEditor::from_items(items.clone());

    let draft = editor.begin_edit(7).cloned().unwrap();
    assert_eq!(draft.donor, "2");
    assert_eq!(draft.amount, "250.00");

    editor.cancel();

    assert_eq!(editor.draft(), &DonationDraft::default());
    assert_eq!(editor.mode(), EditMode::Create);
    assert_eq!(editor.find(7), items.first());
}
