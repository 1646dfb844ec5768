use crudline::{
    CrudError, InputOptions, Location, Nullable, Request, ResourceConfig,
    testing::{Journal, TestRequest},
};
use serde_json::json;

mod common;
use common::{Article, ArticlesController, controller, seeded_store};

fn flash(outcome: &crudline::Outcome) -> Option<&str> {
    outcome
        .as_redirect()?
        .flash
        .get("alerts.success")
        .map(String::as_str)
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_store_persists_and_redirects() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::post()
        .field("title", "Second")
        .field("slug", "second");
    let outcome = controller.store(&request).unwrap();

    let redirect = outcome.as_redirect().unwrap();
    assert_eq!(redirect.location, Location::To("/articles".into()));
    assert_eq!(flash(&outcome), Some("Article created."));

    assert_eq!(store.len(), 2);
    let saved = store.get("2").unwrap();
    assert_eq!(saved.title, "Second");
    assert_eq!(saved.slug, "second");
    assert_eq!(saved.id, Some(2));

    assert_eq!(
        journal.entries(),
        vec![
            "placeholder:beforeAll",
            "placeholder:beforeStore",
            "placeholder:beforeSave",
            "save",
            "placeholder:afterStore",
            "placeholder:afterSave",
        ]
    );
}

#[test]
fn test_store_honors_redirect_field() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::post()
        .field("title", "Second")
        .field("slug", "second")
        .field("_redirect", "/articles/2/edit");
    let outcome = controller.store(&request).unwrap();

    assert_eq!(
        outcome.as_redirect().unwrap().location,
        Location::To("/articles/2/edit".into())
    );
    assert_eq!(flash(&outcome), Some("Article created."));
}

#[test]
fn test_store_custom_flash_key() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let resource = ArticlesController::new(&journal)
        .with_config(ResourceConfig::new().with_flash_key("notice"));
    let controller = controller(resource, &store);

    let request = TestRequest::post().field("title", "Second");
    let outcome = controller.store(&request).unwrap();
    let redirect = outcome.as_redirect().unwrap();

    assert_eq!(redirect.flash.get("notice").map(String::as_str), Some("Article created."));
    assert!(redirect.flash.get("alerts.success").is_none());
}

#[test]
fn test_store_rejected_save_goes_back() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::post()
        .field("title", "reject")
        .field("slug", "nope")
        .field("summary", "")
        .field("notify", "0")
        .field("id", 99);
    let outcome = controller.store(&request).unwrap();
    let redirect = outcome.as_redirect().unwrap();

    assert_eq!(redirect.location, Location::Back);
    assert!(redirect.flash.is_empty());
    assert_eq!(
        redirect.errors.get("title"),
        Some(&["is reserved".to_string()][..])
    );

    // the form gets back exactly what was typed
    let old = redirect.old_input.as_ref().unwrap();
    assert_eq!(old, &request.all());
    assert_eq!(old.get("summary"), Some(&json!("")));
    assert_eq!(old.get("notify"), Some(&json!("0")));
    assert_eq!(old.get("id"), Some(&json!(99)));

    assert_eq!(store.len(), 1);
    assert!(journal.contains("save"));
    assert!(!journal.contains("placeholder:afterStore"));
    assert!(!journal.contains("placeholder:afterSave"));
}

#[test]
fn test_store_rejected_save_as_json() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::post().field("title", "reject").json();
    let outcome = controller.store(&request).unwrap();

    assert_eq!(
        outcome.as_json(),
        Some(&json!({"success": false, "errors": {"title": ["is reserved"]}}))
    );
}

#[test]
fn test_store_with_failing_saves_goes_back() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    store.fail_saves(true);
    let controller = controller(ArticlesController::new(&journal), &store);

    // a rejected save is an outcome, not an error
    let outcome = controller
        .store(&TestRequest::post().field("title", "Fine"))
        .unwrap();
    assert_eq!(outcome.as_redirect().unwrap().location, Location::Back);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_store_undecodable_field_fails_fill() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::post()
        .field("title", "Second")
        .field("published", "maybe");
    let outcome = controller.store(&request).unwrap();
    let redirect = outcome.as_redirect().unwrap();

    assert_eq!(redirect.location, Location::Back);
    assert!(redirect.errors.get("published").is_some());
    assert!(redirect.errors.get("title").is_none());
    assert!(!journal.contains("save"));
    assert!(!journal.contains("placeholder:beforeStore"));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_changes_record() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", "1")
        .field("title", "Changed")
        .field("slug", "changed");
    let outcome = controller.update(&request).unwrap();

    assert_eq!(
        outcome.as_redirect().unwrap().location,
        Location::To("/articles".into())
    );
    assert_eq!(flash(&outcome), Some("Article updated."));

    let saved = store.get("1").unwrap();
    assert_eq!(saved.title, "Changed");
    // slug is not in the update whitelist
    assert_eq!(saved.slug, "hello");
    assert_eq!(store.len(), 1);

    assert_eq!(
        journal.entries(),
        vec![
            "placeholder:beforeAll",
            "find:1",
            "placeholder:beforeUpdate",
            "placeholder:beforeSave",
            "save",
            "placeholder:afterUpdate",
            "placeholder:afterSave",
        ]
    );
}

#[test]
fn test_update_as_json() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", "1")
        .field("title", "Changed")
        .json();
    let outcome = controller.update(&request).unwrap();

    assert_eq!(outcome.as_json(), Some(&json!({"success": true})));
    assert_eq!(store.get("1").unwrap().title, "Changed");
}

#[test]
fn test_update_rejected_save() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", "1")
        .field("title", "reject");

    let outcome = controller.update(&request).unwrap();
    let redirect = outcome.as_redirect().unwrap();
    assert_eq!(redirect.location, Location::Back);
    assert_eq!(
        redirect.old_input.as_ref().and_then(|old| old.get("title")),
        Some(&json!("reject"))
    );

    let outcome = controller.update(&request.clone().json()).unwrap();
    assert_eq!(
        outcome.as_json(),
        Some(&json!({"success": false, "errors": {"title": ["is reserved"]}}))
    );

    assert_eq!(store.get("1").unwrap().title, "Hello");
    assert!(!journal.contains("placeholder:afterUpdate"));
}

#[test]
fn test_update_missing_record_is_not_found() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let resource = ArticlesController::new(&journal)
        .with_config(ResourceConfig::new().with_fetch_should_fail(false));
    let controller = controller(resource, &store);

    let request = TestRequest::put()
        .route("articles", "42")
        .field("title", "Changed");
    let err = controller.update(&request).unwrap_err();

    assert!(matches!(err, CrudError::NotFound(ref e) if e.id == "42"));
    assert!(!journal.contains("save"));
}

// ============================================================================
// Destroy
// ============================================================================

#[test]
fn test_destroy_deletes_record() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let outcome = controller
        .destroy(&TestRequest::delete().route("articles", "1"))
        .unwrap();

    assert!(store.is_empty());
    assert_eq!(
        outcome.as_redirect().unwrap().location,
        Location::To("/articles".into())
    );
    assert_eq!(flash(&outcome), Some("Article deleted."));
    assert_eq!(
        journal.entries(),
        vec![
            "placeholder:beforeAll",
            "find:1",
            "placeholder:beforeDestroy",
            "delete",
            "placeholder:afterDestroy",
        ]
    );
}

#[test]
fn test_destroy_missing_record_is_not_found_even_when_lenient() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let resource = ArticlesController::new(&journal)
        .with_config(ResourceConfig::new().with_fetch_should_fail(false));
    let controller = controller(resource, &store);

    let err = controller
        .destroy(&TestRequest::delete().route("articles", "42"))
        .unwrap_err();

    assert!(matches!(err, CrudError::NotFound(_)));
    assert!(!journal.contains("delete"));
    assert_eq!(store.len(), 1);
}

// ============================================================================
// Input coercion
// ============================================================================

#[test]
fn test_checked_checkbox_becomes_true() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let resource = ArticlesController::new(&journal).with_checkboxes(&["published"]);
    let controller = controller(resource, &store);

    let request = TestRequest::post()
        .field("title", "Second")
        .field("published", "on");
    controller.store(&request).unwrap();

    assert!(store.get("2").unwrap().published);
}

#[test]
fn test_unchecked_checkbox_becomes_false() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let key = store.seed(Article {
        published: true,
        ..Article::new("Live", "live")
    });
    let resource = ArticlesController::new(&journal).with_checkboxes(&["published"]);
    let controller = controller(resource, &store);

    let request = TestRequest::put()
        .route("articles", key.as_str())
        .field("title", "Live");
    controller.update(&request).unwrap();

    assert!(!store.get(&key).unwrap().published);
}

#[test]
fn test_blank_nullable_field_clears_value() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let key = store.seed(Article {
        summary: Some("old".into()),
        ..Article::new("Live", "live")
    });
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", key.as_str())
        .field("summary", "");
    controller.update(&request).unwrap();

    let saved = store.get(&key).unwrap();
    assert_eq!(saved.summary, None);
    assert_eq!(saved.title, "Live");
}

#[test]
fn test_zero_string_nullable_field_clears_value() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let key = store.seed(Article {
        summary: Some("old".into()),
        ..Article::new("Live", "live")
    });
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", key.as_str())
        .field("title", "Live")
        .field("summary", "0");
    controller.update(&request).unwrap();

    assert_eq!(store.get(&key).unwrap().summary, None);
}

#[test]
fn test_blank_field_outside_nullable_list_is_dropped() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let key = store.seed(Article {
        summary: Some("old".into()),
        ..Article::new("Live", "live")
    });
    let resource =
        ArticlesController::new(&journal).with_nullable(Nullable::Only(vec!["title".into()]));
    let controller = controller(resource, &store);

    let request = TestRequest::put()
        .route("articles", key.as_str())
        .field("summary", "");
    controller.update(&request).unwrap();

    assert_eq!(store.get(&key).unwrap().summary.as_deref(), Some("old"));
}

#[test]
fn test_blank_required_field_fails_fill() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let controller = controller(ArticlesController::new(&journal), &store);

    let request = TestRequest::put()
        .route("articles", "1")
        .field("title", "");
    let outcome = controller.update(&request).unwrap();
    let redirect = outcome.as_redirect().unwrap();

    assert_eq!(redirect.location, Location::Back);
    assert!(redirect.errors.get("title").is_some());
    assert_eq!(
        redirect.old_input.as_ref().and_then(|old| old.get("title")),
        Some(&json!(""))
    );
    assert_eq!(store.get("1").unwrap().title, "Hello");
}

#[test]
fn test_raw_input_when_coercion_disabled() {
    let journal = Journal::new();
    let store = seeded_store(&journal);
    let options = InputOptions::default()
        .with_filter(false)
        .with_nullable(false);
    let resource =
        ArticlesController::new(&journal).with_config(ResourceConfig::new().with_input(options));
    let controller = controller(resource, &store);

    let request = TestRequest::put()
        .route("articles", "1")
        .field("title", "");
    controller.update(&request).unwrap();

    assert_eq!(store.get("1").unwrap().title, "");
}
