//! Integration tests for the SOS activation pipeline.
//!
//! These run the orchestrator end to end over the in-memory store with
//! scripted collaborators, and check the attempt-count invariant over
//! arbitrary contact lists.

use proptest::prelude::*;

use lifeline_core::{
    Activation, ActivationError, Contact, Coordinates, DispatchOutcome, FixedLocationProvider,
    Journal, LocationAcquirer, MemoryStore, NoLocationProvider, NullSink, Settings, SilentNotifier,
    SimulatedHost, SosMethod, SosStatus, StaticAuthenticator, User,
};

fn user_named(name: &str, contacts: Vec<Contact>) -> User {
    let mut user = User::new(name, "30", "1 Main St", "+1-555-0000", "female");
    for contact in contacts {
        user.add_contact(contact).unwrap();
    }
    user
}

fn contact(name: &str, phone: &str) -> Contact {
    Contact {
        name: name.to_string(),
        phone: phone.to_string(),
        relationship: "Friend".to_string(),
    }
}

fn no_auth_settings() -> Settings {
    Settings {
        biometric_enabled: false,
        ..Settings::default()
    }
}

#[test]
fn full_activation_on_non_native_host() {
    let host = SimulatedHost;
    let provider = FixedLocationProvider::new(Coordinates::new(37.77, -122.41));
    let auth = StaticAuthenticator::allow();
    let notifier = SilentNotifier;
    let store = MemoryStore::new();
    let sink = NullSink;
    let mut activation = Activation::new(
        &host,
        LocationAcquirer::new(&provider),
        &auth,
        &notifier,
        &store,
        &sink,
    );

    let user = user_named(
        "Ana",
        vec![contact("Alice", "+1-555-1"), contact("Bob", "+1-555-2")],
    );
    let report = activation
        .activate(Some(&user), &no_auth_settings(), SosMethod::Manual)
        .unwrap();

    assert!(report.succeeded());
    assert_eq!(report.success_count, 3);
    assert_eq!(report.attempts, 3);

    // Message formatting: sender name plus the maps link.
    let sms_detail = report.fan_out.outcomes[1].detail.as_ref().unwrap();
    assert!(sms_detail.contains("Ana needs help!"));

    // Journal lifecycle: triggered -> completed with coordinates.
    let history = Journal::new(&store).history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, SosStatus::Completed);
    assert_eq!(history[0].method, SosMethod::Manual);
    assert_eq!(history[0].location.unwrap().longitude, -122.41);
}

#[test]
fn denied_auth_then_allowed_retry() {
    let host = SimulatedHost;
    let provider = NoLocationProvider;
    let notifier = SilentNotifier;
    let store = MemoryStore::new();
    let sink = NullSink;
    let user = user_named("Ana", vec![contact("Alice", "+1-555-1")]);
    let settings = Settings::default();

    let deny = StaticAuthenticator::deny();
    let mut activation = Activation::new(
        &host,
        LocationAcquirer::new(&provider),
        &deny,
        &notifier,
        &store,
        &sink,
    );
    let err = activation
        .activate(Some(&user), &settings, SosMethod::Manual)
        .unwrap_err();
    assert!(matches!(err, ActivationError::AuthDenied));
    assert!(Journal::new(&store).history().unwrap().is_empty());

    let allow = StaticAuthenticator::allow();
    let mut activation = Activation::new(
        &host,
        LocationAcquirer::new(&provider),
        &allow,
        &notifier,
        &store,
        &sink,
    );
    let report = activation
        .activate(Some(&user), &settings, SosMethod::Manual)
        .unwrap();
    assert!(report.succeeded());
    assert_eq!(Journal::new(&store).history().unwrap().len(), 1);
}

#[test]
fn history_accumulates_across_activations() {
    let host = SimulatedHost;
    let provider = NoLocationProvider;
    let auth = StaticAuthenticator::allow();
    let notifier = SilentNotifier;
    let store = MemoryStore::new();
    let sink = NullSink;
    let mut activation = Activation::new(
        &host,
        LocationAcquirer::new(&provider),
        &auth,
        &notifier,
        &store,
        &sink,
    );

    let user = user_named("Ana", vec![contact("Alice", "+1-555-1")]);
    for method in [SosMethod::Manual, SosMethod::Watch, SosMethod::Voice] {
        activation
            .activate(Some(&user), &no_auth_settings(), method)
            .unwrap();
    }

    let journal = Journal::new(&store);
    let history = journal.history().unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|e| e.status == SosStatus::Completed));
    assert_eq!(history[1].method, SosMethod::Watch);

    // Bulk clear is the only deletion path.
    journal.clear().unwrap();
    assert!(journal.history().unwrap().is_empty());
}

#[test]
fn unusable_number_only_lowers_the_count() {
    let host = SimulatedHost;
    let provider = NoLocationProvider;
    let auth = StaticAuthenticator::allow();
    let notifier = SilentNotifier;
    let store = MemoryStore::new();
    let sink = NullSink;
    let mut activation = Activation::new(
        &host,
        LocationAcquirer::new(&provider),
        &auth,
        &notifier,
        &store,
        &sink,
    );

    let user = user_named(
        "Ana",
        vec![contact("Alice", "+1-555-1"), contact("Sym", "---")],
    );
    let report = activation
        .activate(Some(&user), &no_auth_settings(), SosMethod::Manual)
        .unwrap();

    // Call to Alice + SMS to Alice succeed; SMS to Sym fails.
    assert_eq!(report.attempts, 3);
    assert_eq!(report.success_count, 2);
    assert!(report.succeeded());
    assert_eq!(
        report.fan_out.outcomes[2].outcome,
        DispatchOutcome::Failed
    );
}

proptest! {
    /// N contacts always produce exactly N+1 attempts (1 call + N SMS),
    /// whatever the individual outcomes.
    #[test]
    fn attempt_count_is_contacts_plus_one(
        phones in proptest::collection::vec("[0-9+() -]{0,14}", 1..=5)
    ) {
        let host = SimulatedHost;
        let provider = NoLocationProvider;
        let auth = StaticAuthenticator::allow();
        let notifier = SilentNotifier;
        let store = MemoryStore::new();
        let sink = NullSink;
        let mut activation = Activation::new(
            &host,
            LocationAcquirer::new(&provider),
            &auth,
            &notifier,
            &store,
            &sink,
        );

        let contacts: Vec<Contact> = phones
            .iter()
            .enumerate()
            .map(|(i, phone)| contact(&format!("c{i}"), phone))
            .collect();
        let n = contacts.len();
        let user = user_named("Ana", contacts);

        let report = activation
            .activate(Some(&user), &no_auth_settings(), SosMethod::Manual)
            .unwrap();

        prop_assert_eq!(report.attempts, n + 1);
        prop_assert!(report.success_count <= report.attempts);
    }
}
