use std::any::type_name;
use std::fmt;
use std::sync::{Arc, Mutex};

use lucerna::{RegistryBuilder, Service};
use lucerna_logging::{Logger, LoggerProvider};
use lucerna_tracing::{TracingLoggerProvider, TracingLogging};
use tracing::Level;
use tracing::field::{Field, Visit};
use tracing::subscriber::with_default;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Debug, Default)]
struct CapturedEvent {
    level: Option<Level>,
    category: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct Visitor<'a> {
    event: &'a mut CapturedEvent,
}

impl Visit for Visitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "category" {
            self.event.category = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.event.message = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut captured = CapturedEvent {
            level: Some(*event.metadata().level()),
            ..CapturedEvent::default()
        };
        event.record(&mut Visitor {
            event: &mut captured,
        });
        self.events.lock().unwrap().push(captured);
    }
}

struct Pump {
    logger: Logger,
}

impl Service for Pump {}

#[test]
fn records_become_tracing_events() {
    let mut builder = RegistryBuilder::new();
    builder.install(TracingLogging::new());
    builder
        .component::<Pump>()
        .param::<Logger>()
        .constructor(|args| {
            Ok(Pump {
                logger: args.owned::<Logger>()?,
            })
        });
    let container = builder.build().unwrap().container();
    let pump = container.get::<Pump>().unwrap();

    let capture = Capture::default();
    with_default(tracing_subscriber::registry().with(capture.clone()), || {
        pump.logger.warn("pressure above threshold");
        pump.logger.info("pressure back to normal");
    });

    let events = capture.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].level, Some(Level::WARN));
    assert_eq!(events[0].category.as_deref(), Some(type_name::<Pump>()));
    assert_eq!(
        events[0].message.as_deref(),
        Some("pressure above threshold")
    );
    assert_eq!(events[1].level, Some(Level::INFO));
    assert_eq!(events[1].message.as_deref(), Some("pressure back to normal"));
}

#[test]
fn each_level_maps_to_the_matching_tracing_level() {
    let logger = TracingLoggerProvider::new().create_logger("gauge");

    let capture = Capture::default();
    with_default(tracing_subscriber::registry().with(capture.clone()), || {
        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
    });

    let events = capture.events();
    let levels: Vec<_> = events.iter().filter_map(|event| event.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR
        ]
    );
    assert!(
        events
            .iter()
            .all(|event| event.category.as_deref() == Some("gauge"))
    );
}

#[test]
fn loggers_are_named_after_the_requested_category() {
    let logger = TracingLoggerProvider::new().create_logger("conveyor");
    assert_eq!(logger.category(), "conveyor");
}
