use clap::{Subcommand, ValueEnum};
use lifeline_core::error::Result;
use lifeline_core::storage::{load_settings, load_user, Database};
use lifeline_core::{
    Activation, ActivationEvent, ConsoleNotifier, Coordinates, EventSink, FixedLocationProvider,
    LocationAcquirer, LocationProvider, NoLocationProvider, SimulatedHost, SosMethod,
    StaticAuthenticator, UriHost,
};

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Manual,
    Watch,
    Voice,
    Ai,
}

impl From<MethodArg> for SosMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Manual => SosMethod::Manual,
            MethodArg::Watch => SosMethod::Watch,
            MethodArg::Voice => SosMethod::Voice,
            MethodArg::Ai => SosMethod::Ai,
        }
    }
}

#[derive(Subcommand)]
pub enum SosAction {
    /// Trigger an SOS activation
    Trigger {
        /// How the SOS was triggered
        #[arg(long, value_enum, default_value = "manual")]
        method: MethodArg,
        /// Launch real tel:/sms: handlers instead of simulating
        #[arg(long)]
        real: bool,
        /// Identity confirmation, standing in for the device biometric
        /// prompt when authentication is required
        #[arg(long)]
        confirm: bool,
        /// Fixed latitude (no device GPS in the CLI)
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        /// Fixed longitude
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Cancel an SOS by event id
    Cancel {
        event_id: String,
    },
}

/// Streams activation events to stdout as JSON lines.
struct StdoutSink;

impl EventSink for StdoutSink {
    fn publish(&self, event: &ActivationEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            println!("{json}");
        }
    }
}

pub fn run(action: SosAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        SosAction::Trigger {
            method,
            real,
            confirm,
            lat,
            lon,
        } => {
            let user = load_user(&db)?;
            let settings = load_settings(&db)?;

            let simulated = SimulatedHost;
            let native = UriHost;
            let host: &dyn lifeline_core::ChannelHost =
                if real { &native } else { &simulated };

            let fixed;
            let none_provider;
            let provider: &dyn LocationProvider = match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    fixed = FixedLocationProvider::new(Coordinates::new(lat, lon));
                    &fixed
                }
                _ => {
                    none_provider = NoLocationProvider;
                    &none_provider
                }
            };

            let auth = if confirm {
                StaticAuthenticator::allow()
            } else {
                StaticAuthenticator::deny()
            };
            let notifier = ConsoleNotifier;
            let sink = StdoutSink;

            let mut activation = Activation::new(
                host,
                LocationAcquirer::new(provider),
                &auth,
                &notifier,
                &db,
                &sink,
            );
            let report = activation.activate(user.as_ref(), &settings, method.into())?;
            println!("{}", report.summary);
            if !report.succeeded() {
                std::process::exit(1);
            }
        }
        SosAction::Cancel { event_id } => {
            let simulated = SimulatedHost;
            let provider = NoLocationProvider;
            let auth = StaticAuthenticator::deny();
            let notifier = ConsoleNotifier;
            let sink = StdoutSink;
            let mut activation = Activation::new(
                &simulated,
                LocationAcquirer::new(&provider),
                &auth,
                &notifier,
                &db,
                &sink,
            );
            activation.cancel(&event_id)?;
        }
    }
    Ok(())
}
