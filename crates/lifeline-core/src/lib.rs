//! # Lifeline Core Library
//!
//! This library provides the core business logic for the Lifeline
//! personal-safety app. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! front-end being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Activation**: The orchestrator that decides whether an SOS may
//!   fire, then runs gate check -> location -> journal -> fan-out
//! - **Fan-out**: One priority call, then an ordered SMS broadcast,
//!   with per-contact failure isolation
//! - **Storage**: SQLite kv-based persistence for the profile,
//!   settings, and the SOS event history
//! - **Collaborators**: Narrow traits for telephony, positioning,
//!   authentication, and local notification
//!
//! ## Key Components
//!
//! - [`Activation`]: Top-level SOS orchestrator
//! - [`Settings`]: Feature flags with derived gate predicates
//! - [`Journal`]: Append-or-update SOS event history
//! - [`ChannelHost`]: Trait for the telephony/messaging capability

pub mod activation;
pub mod auth;
pub mod channel;
pub mod directory;
pub mod error;
pub mod events;
pub mod fanout;
pub mod journal;
pub mod location;
pub mod notify;
pub mod profile;
pub mod settings;
pub mod storage;

pub use activation::{Activation, ActivationPhase, ActivationReport};
pub use auth::{Authenticator, StaticAuthenticator};
pub use channel::{Channel, ChannelHost, DispatchOutcome, DispatchRecord, SimulatedHost, UriHost};
pub use directory::DirectoryClient;
pub use error::{ActivationError, CoreError, ProfileError, StorageError};
pub use events::{ActivationEvent, CollectingSink, EventSink, NullSink};
pub use fanout::{fan_out, FanOutReport};
pub use journal::{Journal, SosEvent, SosMethod, SosStatus};
pub use location::{
    Coordinates, FixedLocationProvider, LocationAcquirer, LocationProvider, NoLocationProvider,
};
pub use notify::{ConsoleNotifier, Notifier, SilentNotifier};
pub use profile::{Contact, User, MAX_CONTACTS};
pub use settings::Settings;
pub use storage::{Database, MemoryStore, Store};
